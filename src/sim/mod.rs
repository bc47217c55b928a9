//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only (`SpawnSystem`)
//! - Stable iteration order (by entity ID)
//! - Rendering only through the `Canvas` trait

pub mod actor;
pub mod collision;
pub mod entity;
pub mod fish;
pub mod hazard;
pub mod manager;
pub mod pickup;
pub mod player;
pub mod spawn;

pub use actor::Actor;
pub use collision::{CollisionResult, circle_collision};
pub use entity::{Arena, Body, Entity, EntityId, EntityKind, StepContext};
pub use fish::{Fish, FishSpecies};
pub use hazard::{BombPhase, ContactEffect, Hazard, HazardKind};
pub use manager::EntityManager;
pub use pickup::{Pickup, PickupKind};
pub use player::Player;
pub use spawn::{IntervalTimer, SpawnController, SpawnSystem};
