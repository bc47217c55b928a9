//! Owning entity container
//!
//! Entities update in insertion order and are swept in a single stable pass
//! once they stop being alive. Ids are handed out in increasing order and
//! removal never reorders survivors, so the backing vector stays sorted by id.

use super::entity::{Entity, EntityId, EntityKind, StepContext};
use crate::renderer::Canvas;

#[derive(Debug)]
pub struct EntityManager<E> {
    entities: Vec<E>,
    next_id: u32,
}

impl<E> Default for EntityManager<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E: Entity> EntityManager<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of `entity`, assigning it a fresh id
    pub fn add(&mut self, mut entity: E) -> EntityId {
        let id = self.allocate_id();
        entity.body_mut().id = id;
        self.entities.push(entity);
        id
    }

    /// Construct an entity in place from its id
    pub fn create(&mut self, make: impl FnOnce(EntityId) -> E) -> EntityId {
        let id = self.allocate_id();
        let mut entity = make(id);
        entity.body_mut().id = id;
        self.entities.push(entity);
        id
    }

    /// Look up a live-or-pending entity; `None` once it has been swept
    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.entities
            .binary_search_by_key(&id, |e| e.id())
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.entities
            .binary_search_by_key(&id, |e| e.id())
            .ok()
            .map(|i| &mut self.entities[i])
    }

    /// Update every live entity, then sweep the dead
    pub fn update(&mut self, dt: f32, ctx: &StepContext) {
        self.update_with(dt, ctx, |_| {});
    }

    /// Update every live entity, running `hook` on each one still alive
    /// afterwards, then sweep the dead
    pub fn update_with(&mut self, dt: f32, ctx: &StepContext, mut hook: impl FnMut(&mut E)) {
        for entity in self.entities.iter_mut() {
            if !entity.is_alive() {
                continue;
            }
            entity.update(dt, ctx);
            if entity.is_alive() {
                hook(entity);
            }
        }
        self.remove_dead();
    }

    /// Stable single-pass sweep
    pub fn remove_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.is_alive());
        before - self.entities.len()
    }

    /// Draw live entities in insertion order
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for entity in self.entities.iter().filter(|e| e.is_alive()) {
            entity.render(canvas);
        }
    }

    /// All entities of a given kind, in insertion order
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &E> + '_ {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
