//! The player-driven controller: a queue of commands fed in from outside.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::controller::Controller;
use crate::damage::DamageType;
use crate::geom::Direction;
use crate::sound::{Sound, SoundKind};
use crate::world::World;

/// Base damage of a player strike before mitigation
const STRIKE_POWER: f64 = 5.0;

/// One queued player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step (or swap) one tile in a direction
    Move(Direction),

    /// Attack whatever stands one tile away in a direction
    Strike(Direction),

    /// Make noise on purpose
    Shout,

    /// Let the turn pass
    Rest,
}

/// Controller driven by queued commands.
///
/// Each `act` consumes one command. With an empty queue it pauses the round
/// instead of acting, which is how a UI or script regains control: refill
/// the queue (via `Controller::downcast_mut`) and call `World::update`
/// again.
#[derive(Debug)]
pub struct PlayerController {
    queue: VecDeque<Command>,
    /// Base strike damage before the target's defence applies
    pub strike: f64,
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            strike: STRIKE_POWER,
        }
    }

    /// Queue one command.
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Queue several commands in order.
    pub fn enqueue_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.queue.extend(commands);
    }

    /// True when the queue is empty and the next `act` would pause.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for PlayerController {
    fn act(&mut self, world: &mut World, me: ActorId) -> bool {
        let Some(command) = self.queue.pop_front() else {
            // Out of input; hold the world until more commands arrive.
            return false;
        };
        let Some(actor) = world.actor(me) else {
            return true;
        };
        let pos = actor.pos();
        let name = actor.name().to_owned();

        match command {
            Command::Move(dir) => {
                if !world.try_move_to(me, pos.step(dir), false) {
                    world.message(format!("{name} is blocked."));
                }
            }
            Command::Strike(dir) => {
                let target = pos.step(dir);
                match world.occupant_at(target) {
                    Some(victim) => {
                        world.deal_damage(victim, self.strike, DamageType::Physical);
                        world.make_sound(Sound::heard(SoundKind::Clash, target));
                    }
                    None => world.message(format!("{name} strikes at empty air.")),
                }
            }
            Command::Shout => {
                world.message(format!("{name} shouts."));
                world.make_sound(Sound::heard(SoundKind::Shout, pos));
            }
            Command::Rest => {}
        }

        // A command is an action whether or not it changed anything; a
        // blocked move still costs its turn.
        world.end_turn(me);
        true
    }

    fn should_interrupt_on_delete(&self) -> bool {
        true
    }
}
