//! Aimless drifters that investigate noises.

use crate::actor::ActorId;
use crate::consts::{DEFAULT_EARSHOT, FELT_RANGE_FACTOR};
use crate::controller::{Controller, step_towards};
use crate::geom::{Direction, Pos};
use crate::rng::SimRng;
use crate::sound::Sound;
use crate::world::World;

/// Random walker with ears.
///
/// Drifts randomly until a sound lands within earshot, then walks towards
/// where it came from. Felt sounds carry `FELT_RANGE_FACTOR` times further
/// than heard ones. Wanderers are docile and always consent to swaps.
#[derive(Debug)]
pub struct WandererController {
    rng: SimRng,
    /// Radius within which heard sounds register
    pub earshot: i32,
    pending: Option<Sound>,
    goal: Option<Pos>,
}

impl WandererController {
    pub fn new(rng: SimRng) -> Self {
        Self {
            rng,
            earshot: DEFAULT_EARSHOT,
            pending: None,
            goal: None,
        }
    }

    /// Where this wanderer is currently headed, if anywhere.
    pub fn goal(&self) -> Option<Pos> {
        self.goal
    }

    fn drift(&mut self, world: &mut World, me: ActorId, pos: Pos) -> bool {
        // Laze half the time
        if self.rng.one_in(2) {
            return false;
        }
        let Some(dir) = self.rng.choose(&Direction::ALL).copied() else {
            return false;
        };
        world.try_move_to(me, pos.step(dir), false)
    }
}

impl Controller for WandererController {
    fn act(&mut self, world: &mut World, me: ActorId) -> bool {
        let Some(actor) = world.actor(me) else {
            return true;
        };
        let pos = actor.pos();

        // Sounds are delivered without position context; judge audibility
        // now that we know where we stand.
        if let Some(sound) = self.pending.take() {
            let range = if sound.felt {
                self.earshot * FELT_RANGE_FACTOR
            } else {
                self.earshot
            };
            if pos.chebyshev(sound.origin) <= range {
                self.goal = Some(sound.origin);
            }
        }
        if self.goal == Some(pos) {
            self.goal = None;
        }

        let moved = match self.goal {
            Some(goal) => step_towards(&mut self.rng, world, me, pos, goal),
            None => self.drift(world, me, pos),
        };
        if !moved && self.goal.is_some() && self.rng.one_in(4) {
            // Stop pushing towards a spot we cannot reach
            self.goal = None;
        }

        world.end_turn(me);
        true
    }

    fn wants_swap(&self) -> bool {
        true
    }

    fn handle_swap(&mut self) {
        // Being shoved around makes it lose the thread
        self.goal = None;
    }

    fn handle_sound(&mut self, sound: Sound) {
        self.pending = Some(sound);
    }

    fn should_interrupt_on_delete(&self) -> bool {
        false
    }
}
