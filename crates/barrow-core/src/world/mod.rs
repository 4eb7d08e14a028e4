//! The world: actors on terrain, and the operations controllers act through.
//!
//! A `World` owns the actor arena, the terrain, the stat source, and a
//! journal of what happened. Controllers receive `&mut World` while their
//! actor acts and do everything through the methods here; nothing in this
//! module calls back into a controller except the notice delivery paths.

mod errors;
mod scheduler;

pub use errors::WorldError;
pub use scheduler::RoundResult;

use crate::actor::{Actor, ActorId};
use crate::damage::DamageType;
use crate::geom::Pos;
use crate::grid::Terrain;
use crate::roster::Roster;
use crate::sound::Sound;
use crate::stats::StatSource;

/// Notice queued for the acting actor's detached controller.
#[derive(Debug, Clone, Copy)]
enum Notice {
    Swapped,
    Heard(Sound),
}

/// The simulation world.
pub struct World {
    roster: Roster,
    terrain: Box<dyn Terrain>,
    stats: Box<dyn StatSource>,
    player: Option<ActorId>,
    /// Actor currently acting with its controller detached, if any
    acting: Option<ActorId>,
    pending: Vec<(ActorId, Notice)>,
    journal: Vec<String>,
    /// Completed actor turns since construction
    turns: u64,
    /// `next_turn` of the actor most recently offered its turn
    clock: f64,
    in_round: bool,
}

impl World {
    pub fn new(terrain: Box<dyn Terrain>, stats: Box<dyn StatSource>) -> Self {
        Self {
            roster: Roster::new(),
            terrain,
            stats,
            player: None,
            acting: None,
            pending: Vec::new(),
            journal: Vec::new(),
            turns: 0,
            clock: 0.0,
            in_round: false,
        }
    }

    /// Register an actor on a free, walkable tile.
    ///
    /// Fails while a round is running: the actor set is fixed for the
    /// duration of `update`. A corpse awaiting removal does not block its
    /// tile.
    pub fn add_actor(&mut self, actor: Actor) -> Result<ActorId, WorldError> {
        if self.in_round {
            return Err(WorldError::MutationDuringRound);
        }
        let pos = actor.pos();
        if !self.terrain.in_bounds(pos) {
            return Err(WorldError::OutOfBounds(pos));
        }
        if self.terrain.is_wall(pos) || self.roster.occupant_at(pos).is_some() {
            return Err(WorldError::BlockedSpawn(pos));
        }
        Ok(self.roster.insert(actor))
    }

    /// Mark an actor as the player. Hunters and death-interrupt handling
    /// key off this.
    pub fn set_player(&mut self, id: ActorId) -> Result<(), WorldError> {
        if self.in_round {
            return Err(WorldError::MutationDuringRound);
        }
        self.player = Some(id);
        Ok(())
    }

    /// The player's handle, as long as the actor still exists.
    pub fn player_id(&self) -> Option<ActorId> {
        self.player.filter(|id| self.roster.contains(*id))
    }

    pub fn player(&self) -> Option<&Actor> {
        self.roster.get(self.player?)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.roster.get_mut(id)
    }

    /// All actors in registration order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.roster.iter()
    }

    pub fn actor_count(&self) -> usize {
        self.roster.len()
    }

    /// The live actor on a tile, if any.
    pub fn occupant_at(&self, pos: Pos) -> Option<ActorId> {
        self.roster.occupant_at(pos)
    }

    pub fn terrain(&self) -> &dyn Terrain {
        self.terrain.as_ref()
    }

    pub fn stats(&self) -> &dyn StatSource {
        self.stats.as_ref()
    }

    /// Completed actor turns since the world was created.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Simulation time, read as the `next_turn` of the actor most recently
    /// offered its turn. Not monotonic across rounds if actors join at
    /// time 0 later on.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn in_round(&self) -> bool {
        self.in_round
    }

    /// Append a line to the journal.
    pub fn message(&mut self, msg: impl Into<String>) {
        self.journal.push(msg.into());
    }

    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    /// Drain the journal for display.
    pub fn take_journal(&mut self) -> Vec<String> {
        core::mem::take(&mut self.journal)
    }

    /// Check whether `me` could enter `target` right now.
    ///
    /// True when the tile is in bounds, not a wall, and either free, held
    /// by a consenting occupant, or `force_swap` is set. An actor can
    /// always "enter" its own tile; dead or unknown movers can do nothing.
    pub fn can_move_to_or_attack(&self, me: ActorId, target: Pos, force_swap: bool) -> bool {
        let Some(mover) = self.roster.get(me) else {
            return false;
        };
        if !mover.is_alive() {
            return false;
        }
        if mover.pos() == target {
            return true;
        }
        if !self.terrain.in_bounds(target) || self.terrain.is_wall(target) {
            return false;
        }
        match self.roster.occupant_at(target) {
            None => true,
            Some(occupant) => {
                force_swap
                    || self
                        .roster
                        .get(occupant)
                        .and_then(Actor::controller)
                        .is_some_and(|controller| controller.wants_swap())
            }
        }
    }

    /// Move `me` onto `target`, swapping places with any occupant that
    /// permits it (or regardless, when `force_swap` is set).
    ///
    /// Both sides of a swap are told through `Controller::handle_swap`.
    /// Returns false and changes nothing when the move is not possible.
    pub fn try_move_to(&mut self, me: ActorId, target: Pos, force_swap: bool) -> bool {
        if !self.can_move_to_or_attack(me, target, force_swap) {
            return false;
        }
        let Some(mover) = self.roster.get(me) else {
            return false;
        };
        if mover.pos() == target {
            return true;
        }
        match self.roster.occupant_at(target) {
            None => self.roster.relocate(me, target),
            Some(occupant) => {
                if !self.roster.swap_positions(me, occupant) {
                    return false;
                }
                let line = match (self.roster.get(me), self.roster.get(occupant)) {
                    (Some(a), Some(b)) => {
                        Some(format!("{} and {} trade places.", a.name(), b.name()))
                    }
                    _ => None,
                };
                if let Some(line) = line {
                    self.message(line);
                }
                self.notify_swap(me);
                self.notify_swap(occupant);
                true
            }
        }
    }

    /// Apply damage to an actor, after its defence. Returns the amount
    /// actually dealt. Unknown targets and corpses soak nothing.
    ///
    /// Callable from outside a round as well; deaths are collected at the
    /// next removal point.
    pub fn deal_damage(&mut self, target: ActorId, amount: f64, kind: DamageType) -> f64 {
        let stats = self.stats.as_ref();
        let Some(actor) = self.roster.get_mut(target) else {
            return 0.0;
        };
        let was_alive = actor.is_alive();
        let dealt = actor.take_damage(amount, kind, stats);
        let name = actor.name().to_owned();
        let died = was_alive && !actor.is_alive();

        if dealt > 0.0 {
            self.message(format!("{name} takes {dealt:.1} {kind} damage."));
        }
        if died {
            self.message(format!("{name} dies."));
        }
        dealt
    }

    /// Complete `me`'s turn: advance its clock by the speed-adjusted delay
    /// and apply regeneration. Controllers call this exactly once per
    /// action taken.
    pub fn end_turn(&mut self, me: ActorId) {
        let stats = self.stats.as_ref();
        if let Some(actor) = self.roster.get_mut(me) {
            if actor.is_alive() {
                actor.end_turn(stats);
                self.turns += 1;
            }
        }
    }

    /// Broadcast a sound to every live actor's controller, the emitter's
    /// included. Delivery to the acting actor is deferred until its
    /// controller is re-attached.
    pub fn make_sound(&mut self, sound: Sound) {
        let verb = if sound.felt { "Tremor" } else { "Noise" };
        self.message(format!("{verb} of {} from {}.", sound.kind, sound.origin));

        for id in self.roster.ids() {
            let Some(actor) = self.roster.get_mut(id) else {
                continue;
            };
            if !actor.is_alive() {
                continue;
            }
            if self.acting == Some(id) {
                self.pending.push((id, Notice::Heard(sound)));
            } else if let Some(controller) = actor.controller_mut() {
                controller.handle_sound(sound);
            }
        }
    }

    fn notify_swap(&mut self, id: ActorId) {
        if self.acting == Some(id) {
            self.pending.push((id, Notice::Swapped));
            return;
        }
        if let Some(controller) = self.roster.get_mut(id).and_then(Actor::controller_mut) {
            controller.handle_swap();
        }
    }

    /// Deliver notices queued for `id` while its controller was detached.
    pub(crate) fn flush_pending(&mut self, id: ActorId) {
        if self.pending.is_empty() {
            return;
        }
        let mut kept = Vec::new();
        for (target, notice) in core::mem::take(&mut self.pending) {
            if target != id {
                kept.push((target, notice));
                continue;
            }
            if let Some(controller) = self.roster.get_mut(target).and_then(Actor::controller_mut) {
                match notice {
                    Notice::Swapped => controller.handle_swap(),
                    Notice::Heard(sound) => controller.handle_sound(sound),
                }
            }
        }
        self.pending = kept;
    }
}
