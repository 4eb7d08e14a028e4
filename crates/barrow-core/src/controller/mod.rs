//! Controllers: the pluggable decision-making strategies actors carry.
//!
//! A controller is owned by exactly one actor. While that actor acts, the
//! controller is detached from it and handed the whole world mutably, so it
//! can move, attack, make noise, and inspect anything. Notices addressed to
//! the acting actor during that window (swaps, sounds) are queued and
//! delivered as soon as the controller is re-attached.

mod hunter;
mod player;
mod wander;

pub use hunter::HunterController;
pub use player::{Command, PlayerController};
pub use wander::WandererController;

use core::any::Any;

use crate::actor::ActorId;
use crate::geom::Pos;
use crate::rng::SimRng;
use crate::sound::Sound;
use crate::world::World;

/// An actor's strategy.
///
/// Implementations outside this crate are expected; the scheduler only ever
/// talks to actors through this interface.
pub trait Controller: Any {
    /// Decide and perform the actor's next action.
    ///
    /// An implementation must call `world.end_turn(me)` exactly once for each
    /// logical action it takes, even one that came to nothing, so the actor's
    /// clock advances. Return `true` to keep the round running, `false` to
    /// pause the whole round. A controller waiting for outside input returns
    /// `false` without ending a turn: its clock has not moved, so it is
    /// selected again first when the round resumes.
    ///
    /// `me` may already be stale or dead in rare embeddings; implementations
    /// should tolerate `world.actor(me)` returning `None`.
    fn act(&mut self, world: &mut World, me: ActorId) -> bool;

    /// Whether this actor lets another actor trade places with it.
    ///
    /// Consulted when someone tries to step onto this actor's tile without
    /// forcing. No world access here: consent must be answerable from the
    /// controller's own state.
    fn wants_swap(&self) -> bool {
        false
    }

    /// Told that this actor was just moved by a position swap.
    fn handle_swap(&mut self) {}

    /// Told about a sound event. Every live actor's controller hears every
    /// sound; distance and relevance filtering is the controller's business.
    fn handle_sound(&mut self, sound: Sound) {
        let _ = sound;
    }

    /// Whether removing this actor's corpse should abort the running round.
    ///
    /// Player-like actors return true so an embedder regains control the
    /// moment they die, even mid-round on someone else's turn.
    fn should_interrupt_on_delete(&self) -> bool {
        false
    }
}

impl dyn Controller {
    /// Borrow the concrete controller type, if it matches.
    pub fn downcast_ref<C: Controller>(&self) -> Option<&C> {
        (self as &dyn Any).downcast_ref()
    }

    /// Mutably borrow the concrete controller type, if it matches.
    ///
    /// Embedders use this to feed input to a `PlayerController` between
    /// rounds.
    pub fn downcast_mut<C: Controller>(&mut self) -> Option<&mut C> {
        (self as &mut dyn Any).downcast_mut()
    }
}

/// Take one step from `from` towards `goal`: the direct step first, then
/// the two neighbouring alternatives. Returns true if a step (or swap)
/// happened.
pub(crate) fn step_towards(
    rng: &mut SimRng,
    world: &mut World,
    me: ActorId,
    from: Pos,
    goal: Pos,
) -> bool {
    if goal.layer != from.layer || goal == from {
        return false;
    }
    let dx = (goal.x - from.x).signum();
    let dy = (goal.y - from.y).signum();

    let mut steps = if dx != 0 && dy != 0 {
        // Preferred diagonal, then its two cardinal components
        [(dx, dy), (dx, 0), (0, dy)]
    } else if dx != 0 {
        // Straight along x, then the flanking diagonals
        [(dx, 0), (dx, 1), (dx, -1)]
    } else {
        [(0, dy), (1, dy), (-1, dy)]
    };
    // Vary which alternative gets tried first
    if rng.one_in(2) {
        steps.swap(1, 2);
    }

    for (sx, sy) in steps {
        let target = Pos::new(from.x + sx, from.y + sy, from.layer);
        if world.try_move_to(me, target, false) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::grid::TileGrid;
    use crate::stats::FlatStats;

    fn open_world() -> World {
        World::new(
            Box::new(TileGrid::open(12, 12, 1)),
            Box::new(FlatStats::default()),
        )
    }

    #[test]
    fn test_step_towards_closes_distance() {
        let mut world = open_world();
        let id = world
            .add_actor(Actor::new("walker", Pos::new(2, 2, 0), 10.0, 1.0))
            .unwrap();
        let goal = Pos::new(8, 5, 0);
        let mut rng = SimRng::new(7);

        let before = Pos::new(2, 2, 0).chebyshev(goal);
        assert!(step_towards(&mut rng, &mut world, id, Pos::new(2, 2, 0), goal));
        let after = world.actor(id).unwrap().pos().chebyshev(goal);
        assert!(after < before);
    }

    #[test]
    fn test_step_towards_sidesteps_walls() {
        let mut world = World::new(
            Box::new({
                let mut grid = TileGrid::open(12, 12, 1);
                // Wall directly between walker and goal
                grid.set(Pos::new(3, 2, 0), crate::grid::TileKind::Wall);
                grid
            }),
            Box::new(FlatStats::default()),
        );
        let id = world
            .add_actor(Actor::new("walker", Pos::new(2, 2, 0), 10.0, 1.0))
            .unwrap();
        let mut rng = SimRng::new(7);

        assert!(step_towards(
            &mut rng,
            &mut world,
            id,
            Pos::new(2, 2, 0),
            Pos::new(6, 2, 0)
        ));
        assert_ne!(world.actor(id).unwrap().pos(), Pos::new(2, 2, 0));
    }

    #[test]
    fn test_step_towards_refuses_cross_layer() {
        let mut world = open_world();
        let id = world
            .add_actor(Actor::new("walker", Pos::new(2, 2, 0), 10.0, 1.0))
            .unwrap();
        let mut rng = SimRng::new(7);

        assert!(!step_towards(
            &mut rng,
            &mut world,
            id,
            Pos::new(2, 2, 0),
            Pos::new(5, 5, 1)
        ));
        assert_eq!(world.actor(id).unwrap().pos(), Pos::new(2, 2, 0));
    }
}
