//! State stack with deferred transitions

use std::collections::HashMap;
use std::mem;

use super::{Context, Session, State, StateAction, StateId};
use crate::error::{GameError, Result};
use crate::platform::Event;
use crate::renderer::Canvas;

type Factory = Box<dyn Fn(&Session) -> Box<dyn State>>;

#[derive(Default)]
pub struct StateManager {
    /// Bottom to top
    stack: Vec<(StateId, Box<dyn State>)>,
    factories: HashMap<StateId, Factory>,
    pending: Vec<StateAction>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: StateId, factory: impl Fn(&Session) -> Box<dyn State> + 'static) {
        self.factories.insert(id, Box::new(factory));
    }

    /// Queue an action for the next `apply_pending_changes`
    pub fn request(&mut self, action: StateAction) {
        self.pending.push(action);
    }

    /// Forward an event to the top state only
    pub fn handle_event(&mut self, event: &Event, session: &mut Session) {
        if let Some((_, top)) = self.stack.last_mut() {
            let mut ctx = Context::new(session, &mut self.pending);
            top.handle_event(event, &mut ctx);
        }
    }

    /// Update from the top down, stopping at the first state that returns false
    pub fn update(&mut self, dt: f32, session: &mut Session) {
        let mut ctx = Context::new(session, &mut self.pending);
        for (_, state) in self.stack.iter_mut().rev() {
            if !state.update(dt, &mut ctx) {
                break;
            }
        }
    }

    /// Replay queued actions in submission order. Actions requested by
    /// activate/deactivate hooks during the replay wait for the next call.
    /// An unregistered push fails the whole batch before the stack changes.
    pub fn apply_pending_changes(&mut self, session: &mut Session) -> Result<()> {
        if let Some(id) = self.pending.iter().find_map(|action| match action {
            StateAction::Push(id) if !self.factories.contains_key(id) => Some(*id),
            _ => None,
        }) {
            return Err(GameError::StateNotFound(id));
        }

        for action in mem::take(&mut self.pending) {
            match action {
                StateAction::Push(id) => {
                    let factory = self.factories.get(&id).ok_or(GameError::StateNotFound(id))?;
                    let state = factory(&*session);
                    log::info!("Push state {:?}", id);
                    self.stack.push((id, state));
                    if let Some((_, top)) = self.stack.last_mut() {
                        top.on_activate(&mut Context::new(session, &mut self.pending));
                    }
                }
                StateAction::Pop => {
                    let Some((id, mut state)) = self.stack.pop() else {
                        log::warn!("Pop on empty state stack ignored");
                        continue;
                    };
                    log::info!("Pop state {:?}", id);
                    state.on_deactivate(&mut Context::new(session, &mut self.pending));
                    if let Some((_, top)) = self.stack.last_mut() {
                        top.on_activate(&mut Context::new(session, &mut self.pending));
                    }
                }
                StateAction::Clear => {
                    if self.stack.is_empty() {
                        log::warn!("Clear on empty state stack ignored");
                        continue;
                    }
                    log::info!("Clear {} states", self.stack.len());
                    while let Some((_, mut state)) = self.stack.pop() {
                        state.on_deactivate(&mut Context::new(session, &mut self.pending));
                    }
                }
            }
        }
        Ok(())
    }

    /// Draw from the topmost opaque state upward, so overlays paint last
    pub fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        let start = self
            .stack
            .iter()
            .rposition(|(_, state)| state.is_opaque())
            .unwrap_or(0);
        for (_, state) in &self.stack[start..] {
            state.render(canvas, session);
        }
    }

    /// Top state downcast to `T`
    pub fn current_state<T: State>(&self) -> Option<&T> {
        self.stack.last()?.1.as_any().downcast_ref::<T>()
    }

    pub fn top_id(&self) -> Option<StateId> {
        self.stack.last().map(|(id, _)| *id)
    }

    /// Ids bottom to top
    pub fn ids(&self) -> Vec<StateId> {
        self.stack.iter().map(|(id, _)| *id).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
