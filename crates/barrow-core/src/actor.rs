//! Actor instances and their handles.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::controller::Controller;
use crate::damage::{self, DamageType};
use crate::geom::Pos;
use crate::stats::StatSource;

/// Stable handle to an actor slot.
///
/// Handles are generational: after a slot is reused the old handle stops
/// resolving instead of aliasing the new occupant. Holding a handle to a
/// removed actor is normal; lookups just return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
    index: u32,
    generation: u32,
}

impl ActorId {
    /// Placeholder carried by actors not yet registered in a world.
    pub const UNSET: ActorId = ActorId {
        index: u32::MAX,
        generation: 0,
    };

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) const fn index(self) -> u32 {
        self.index
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

/// An actor on the grid.
///
/// Health and the scheduling clock are real-valued. `next_turn` is the
/// earliest time this actor may act again and only ever moves forward;
/// `turn_delay` is the per-action cost before the speed divisor.
pub struct Actor {
    id: ActorId,
    name: String,
    pos: Pos,
    hp: f64,
    hp_max: f64,
    next_turn: f64,
    turn_delay: f64,
    controller: Option<Box<dyn Controller>>,
}

impl Actor {
    /// Create an unregistered actor at full health, ready to act at time 0.
    ///
    /// `turn_delay` must be positive. The world assigns the real id at
    /// registration.
    pub fn new(name: impl Into<String>, pos: Pos, hp_max: f64, turn_delay: f64) -> Self {
        Self {
            id: ActorId::UNSET,
            name: name.into(),
            pos,
            hp: hp_max,
            hp_max,
            next_turn: 0.0,
            turn_delay,
            controller: None,
        }
    }

    /// Attach a controller at construction time.
    pub fn with_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn hp_max(&self) -> f64 {
        self.hp_max
    }

    pub fn next_turn(&self) -> f64 {
        self.next_turn
    }

    pub fn turn_delay(&self) -> f64 {
        self.turn_delay
    }

    /// Change the per-action cost. Takes effect from the next completed turn.
    pub fn set_turn_delay(&mut self, turn_delay: f64) {
        self.turn_delay = turn_delay;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn controller(&self) -> Option<&dyn Controller> {
        self.controller.as_deref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut (dyn Controller + 'static)> {
        self.controller.as_deref_mut()
    }

    /// Replace the controller, returning the old one.
    pub fn set_controller(&mut self, controller: Box<dyn Controller>) -> Option<Box<dyn Controller>> {
        self.controller.replace(controller)
    }

    pub(crate) fn take_controller(&mut self) -> Option<Box<dyn Controller>> {
        self.controller.take()
    }

    pub(crate) fn put_controller(&mut self, controller: Box<dyn Controller>) {
        self.controller = Some(controller);
    }

    pub(crate) fn set_id(&mut self, id: ActorId) {
        self.id = id;
    }

    pub(crate) fn set_pos(&mut self, pos: Pos) {
        self.pos = pos;
    }

    /// Apply incoming damage after mitigation. Returns the amount actually
    /// dealt.
    ///
    /// A dead actor is inert: further damage is a no-op.
    pub fn take_damage(&mut self, amount: f64, kind: DamageType, stats: &dyn StatSource) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }
        let dealt = damage::mitigated(amount, stats.defence(self, kind));
        self.hp -= dealt;
        dealt
    }

    /// Complete a turn: advance `next_turn` by the speed-adjusted delay and
    /// apply regeneration, capped at `hp_max`.
    ///
    /// A dead actor is inert: its clock never advances and it never regens.
    pub fn end_turn(&mut self, stats: &dyn StatSource) {
        if !self.is_alive() {
            return;
        }
        let speed = stats.effective_speed(self).max(crate::consts::MIN_SPEED);
        self.next_turn += self.turn_delay / speed;
        self.hp = (self.hp + stats.regen_rate(self)).min(self.hp_max);
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pos", &self.pos)
            .field("hp", &self.hp)
            .field("hp_max", &self.hp_max)
            .field("next_turn", &self.next_turn)
            .field("turn_delay", &self.turn_delay)
            .field("has_controller", &self.controller.is_some())
            .finish()
    }
}
