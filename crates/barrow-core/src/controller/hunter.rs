//! Predators that pursue the player actor.

use crate::actor::ActorId;
use crate::controller::{Controller, step_towards};
use crate::damage::DamageType;
use crate::geom::Pos;
use crate::rng::SimRng;
use crate::sound::{Sound, SoundKind};
use crate::world::World;

/// Base damage of a hunter bite before the d4 roll
const BITE_POWER: f64 = 3.0;

/// What the hunter decided to do with its turn.
enum Quarry {
    /// Prey in reach: bite it
    Adjacent(ActorId, Pos),
    /// Close the distance to here
    Toward(Pos),
    /// Nothing to hunt; hold position and listen
    None,
}

/// Pursues the world's player actor, falling back to the last sound it was
/// told about when the player is gone or unreachable.
///
/// Hunters never filter sounds by distance: any noise refreshes the spot
/// they will investigate.
#[derive(Debug)]
pub struct HunterController {
    rng: SimRng,
    /// Base bite damage before the target's defence applies
    pub strike: f64,
    /// Pack hunters let each other squeeze past
    pub pack_swap: bool,
    mark: Option<Pos>,
}

impl HunterController {
    pub fn new(rng: SimRng) -> Self {
        Self {
            rng,
            strike: BITE_POWER,
            pack_swap: true,
            mark: None,
        }
    }

    /// The spot this hunter would investigate next, if any.
    pub fn mark(&self) -> Option<Pos> {
        self.mark
    }

    fn quarry(&self, world: &World, pos: Pos) -> Quarry {
        if let Some(prey_id) = world.player_id() {
            if let Some(prey) = world.actor(prey_id) {
                if prey.is_alive() {
                    let prey_pos = prey.pos();
                    if pos.is_adjacent(prey_pos) {
                        return Quarry::Adjacent(prey_id, prey_pos);
                    }
                    if prey_pos.layer == pos.layer {
                        return Quarry::Toward(prey_pos);
                    }
                }
            }
        }
        match self.mark {
            Some(mark) if mark != pos => Quarry::Toward(mark),
            _ => Quarry::None,
        }
    }
}

impl Controller for HunterController {
    fn act(&mut self, world: &mut World, me: ActorId) -> bool {
        let Some(actor) = world.actor(me) else {
            return true;
        };
        let pos = actor.pos();
        if self.mark == Some(pos) {
            self.mark = None;
        }

        match self.quarry(world, pos) {
            Quarry::Adjacent(prey_id, prey_pos) => {
                let damage = self.strike + self.rng.rnd(4) as f64;
                world.deal_damage(prey_id, damage, DamageType::Physical);
                world.make_sound(Sound::heard(SoundKind::Clash, prey_pos));
                self.mark = None;
            }
            Quarry::Toward(goal) => {
                if !step_towards(&mut self.rng, world, me, pos, goal) && self.rng.one_in(3) {
                    // Boxed in; let the stale mark go
                    self.mark = None;
                }
            }
            Quarry::None => {}
        }

        world.end_turn(me);
        true
    }

    fn wants_swap(&self) -> bool {
        self.pack_swap
    }

    fn handle_sound(&mut self, sound: Sound) {
        self.mark = Some(sound.origin);
    }
}
