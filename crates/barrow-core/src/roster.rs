//! Actor storage: a generational slot arena plus a position index.
//!
//! The arena owns every actor; everything else refers to actors through
//! `ActorId` handles. Iteration follows registration order, which is what
//! breaks scheduling ties.

use hashbrown::HashMap;

use crate::actor::{Actor, ActorId};
use crate::geom::Pos;

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// The actor arena.
#[derive(Debug, Default)]
pub struct Roster {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ActorId>,
    occupancy: HashMap<Pos, ActorId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor, assigning it a fresh handle.
    pub fn insert(&mut self, mut actor: Actor) -> ActorId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let id = ActorId::new(index, self.slots[index as usize].generation);
        actor.set_id(id);
        self.occupancy.insert(actor.pos(), id);
        self.slots[index as usize].actor = Some(actor);
        self.order.push(id);
        id
    }

    /// Remove an actor, invalidating its handle. The freed slot's next
    /// occupant gets a new generation, so the old handle stays dead.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let actor = slot.actor.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.order.retain(|other| *other != id);
        // Another actor may have stepped onto a corpse's tile; only clear
        // the entry if it is still ours.
        if self.occupancy.get(&actor.pos()) == Some(&id) {
            self.occupancy.remove(&actor.pos());
        }
        Some(actor)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.actor.as_ref()
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.actor.as_mut()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handles of all registered actors, oldest first.
    pub fn order(&self) -> &[ActorId] {
        &self.order
    }

    /// Snapshot of `order()`, for loops that go on to mutate the roster.
    pub fn ids(&self) -> Vec<ActorId> {
        self.order.clone()
    }

    /// Iterate actors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    /// The live actor on a tile, if any. Corpses awaiting removal do not
    /// block a tile.
    pub fn occupant_at(&self, pos: Pos) -> Option<ActorId> {
        let id = *self.occupancy.get(&pos)?;
        let actor = self.get(id)?;
        actor.is_alive().then_some(id)
    }

    /// Move an actor to a new tile, keeping the position index in step.
    pub(crate) fn relocate(&mut self, id: ActorId, pos: Pos) -> bool {
        let old = match self.get(id) {
            Some(actor) => actor.pos(),
            None => return false,
        };
        if let Some(actor) = self.get_mut(id) {
            actor.set_pos(pos);
        }
        if self.occupancy.get(&old) == Some(&id) {
            self.occupancy.remove(&old);
        }
        self.occupancy.insert(pos, id);
        true
    }

    /// Exchange the tiles of two actors.
    pub(crate) fn swap_positions(&mut self, a: ActorId, b: ActorId) -> bool {
        if a == b {
            return false;
        }
        let (pa, pb) = match (self.get(a), self.get(b)) {
            (Some(first), Some(second)) => (first.pos(), second.pos()),
            _ => return false,
        };
        if let Some(actor) = self.get_mut(a) {
            actor.set_pos(pb);
        }
        if let Some(actor) = self.get_mut(b) {
            actor.set_pos(pa);
        }
        self.occupancy.insert(pb, a);
        self.occupancy.insert(pa, b);
        true
    }
}
