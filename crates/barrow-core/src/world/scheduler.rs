//! The turn loop: pick whoever is due, let it act, bury the dead, repeat.
//!
//! Scheduling is driven purely by each actor's `next_turn` timestamp. A
//! fast actor accumulates time in small increments and therefore gets
//! selected more often than a slow one; no per-round action counting is
//! involved. Ties go to the earliest-registered actor.

use super::World;
use crate::actor::{Actor, ActorId};

/// How a call to [`World::update`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// A controller declined to continue; call `update` again once it has
    /// input.
    Paused,
    /// No actor can act any more, or a dying actor aborted the round.
    Done,
}

impl World {
    /// Run one round.
    ///
    /// Actors act in `next_turn` order until a controller pauses the round
    /// or nobody is left to act. The actor set is fixed for the duration:
    /// deaths are collected at resolution points inside the loop, and
    /// `add_actor` is rejected until the call returns.
    pub fn update(&mut self) -> RoundResult {
        self.in_round = true;
        let result = self.run_round();
        self.in_round = false;
        result
    }

    fn run_round(&mut self) -> RoundResult {
        // Damage can arrive between rounds; bury those corpses before the
        // first selection.
        if self.sweep_dead() {
            return RoundResult::Done;
        }
        loop {
            let Some(id) = self.next_actor() else {
                return RoundResult::Done;
            };
            if let Some(actor) = self.roster.get(id) {
                self.clock = actor.next_turn();
            }
            let keep_going = self.run_actor(id);
            if self.sweep_dead() {
                return RoundResult::Done;
            }
            // A dead actor's verdict is void; the round went on without it.
            if !keep_going && self.roster.contains(id) {
                return RoundResult::Paused;
            }
        }
    }

    /// The live, controlled actor with the smallest `next_turn`. Strict
    /// comparison keeps the earliest-registered actor ahead on ties. Actors
    /// without a controller never take turns.
    fn next_actor(&self) -> Option<ActorId> {
        let mut best: Option<(f64, ActorId)> = None;
        for actor in self.roster.iter() {
            if !actor.is_alive() || actor.controller().is_none() {
                continue;
            }
            match best {
                Some((time, _)) if actor.next_turn() >= time => {}
                _ => best = Some((actor.next_turn(), actor.id())),
            }
        }
        best.map(|(_, id)| id)
    }

    /// Detach the actor's controller, let it act against the world, then
    /// re-attach it and deliver whatever happened to the actor meanwhile.
    fn run_actor(&mut self, id: ActorId) -> bool {
        let Some(mut controller) = self.roster.get_mut(id).and_then(Actor::take_controller)
        else {
            return true;
        };
        self.acting = Some(id);
        let keep_going = controller.act(self, id);
        self.acting = None;
        if let Some(actor) = self.roster.get_mut(id) {
            actor.put_controller(controller);
        }
        self.flush_pending(id);
        keep_going
    }

    /// Remove every dead actor, in registration order. True when one of
    /// them wants the round aborted.
    fn sweep_dead(&mut self) -> bool {
        let mut interrupt = false;
        for id in self.roster.ids() {
            let dead = self
                .roster
                .get(id)
                .is_some_and(|actor| !actor.is_alive());
            if !dead {
                continue;
            }
            if let Some(corpse) = self.roster.remove(id) {
                interrupt |= corpse
                    .controller()
                    .is_some_and(|c| c.should_interrupt_on_delete());
            }
        }
        interrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::damage::DamageType;
    use crate::geom::Pos;
    use crate::grid::TileGrid;
    use crate::stats::FlatStats;

    /// Journals its name, then pauses once its action budget runs out.
    struct Scripted {
        left: u32,
    }

    impl Controller for Scripted {
        fn act(&mut self, world: &mut World, me: ActorId) -> bool {
            if self.left == 0 {
                return false;
            }
            self.left -= 1;
            let line = match world.actor(me) {
                Some(actor) => format!("{} acts.", actor.name()),
                None => return false,
            };
            world.message(line);
            world.end_turn(me);
            true
        }
    }

    /// Kills a fixed target every turn.
    struct Assassin {
        target: ActorId,
    }

    impl Controller for Assassin {
        fn act(&mut self, world: &mut World, me: ActorId) -> bool {
            world.deal_damage(self.target, 1000.0, DamageType::Physical);
            world.end_turn(me);
            true
        }
    }

    /// Rests each turn; its removal aborts the round.
    struct Martyr;

    impl Controller for Martyr {
        fn act(&mut self, world: &mut World, me: ActorId) -> bool {
            world.end_turn(me);
            true
        }

        fn should_interrupt_on_delete(&self) -> bool {
            true
        }
    }

    /// Rests each turn, nothing more.
    struct Idler;

    impl Controller for Idler {
        fn act(&mut self, world: &mut World, me: ActorId) -> bool {
            world.end_turn(me);
            true
        }
    }

    fn open_world() -> World {
        World::new(
            Box::new(TileGrid::open(10, 10, 1)),
            Box::new(FlatStats::default()),
        )
    }

    fn scripted_actor(name: &str, x: i32, delay: f64, budget: u32) -> crate::actor::Actor {
        Actor::new(name, Pos::new(x, 1, 0), 10.0, delay)
            .with_controller(Box::new(Scripted { left: budget }))
    }

    #[test]
    fn test_round_follows_timestamps_with_registration_tiebreak() {
        let mut world = open_world();
        world.add_actor(scripted_actor("quick", 1, 1.0, 3)).unwrap();
        world.add_actor(scripted_actor("slow", 2, 2.0, 2)).unwrap();

        assert_eq!(world.update(), RoundResult::Paused);
        assert_eq!(
            world.take_journal(),
            vec![
                "quick acts.", // t=0, tie broken by registration
                "slow acts.",  // t=0
                "quick acts.", // t=1
                "quick acts.", // t=2, tie with slow, quick registered first
                "slow acts.",  // t=2
            ]
        );
        assert_eq!(world.turns(), 5);
    }

    #[test]
    fn test_empty_world_is_done() {
        let mut world = open_world();
        assert_eq!(world.update(), RoundResult::Done);
    }

    #[test]
    fn test_corpses_from_between_rounds_are_buried_first() {
        let mut world = open_world();
        let a = world.add_actor(scripted_actor("late", 1, 1.0, 5)).unwrap();
        world.deal_damage(a, 1000.0, DamageType::Physical);

        assert_eq!(world.update(), RoundResult::Done);
        assert!(world.actor(a).is_none());
        assert_eq!(world.actor_count(), 0);
        assert!(!world.take_journal().iter().any(|l| l.contains("late acts.")));
    }

    #[test]
    fn test_death_with_interrupt_aborts_the_round() {
        let mut world = open_world();
        let victim = world
            .add_actor(
                Actor::new("victim", Pos::new(1, 1, 0), 10.0, 1.0)
                    .with_controller(Box::new(Martyr)),
            )
            .unwrap();
        world
            .add_actor(
                Actor::new("assassin", Pos::new(2, 1, 0), 10.0, 1.0)
                    .with_controller(Box::new(Assassin { target: victim })),
            )
            .unwrap();
        world.add_actor(scripted_actor("witness", 3, 1.0, 5)).unwrap();

        assert_eq!(world.update(), RoundResult::Done);
        assert!(world.actor(victim).is_none());
        assert_eq!(world.actor_count(), 2);
        // The witness was due at t=0 but the abort came first.
        assert!(!world.take_journal().iter().any(|l| l.contains("witness")));
    }

    #[test]
    fn test_death_without_interrupt_lets_the_round_continue() {
        let mut world = open_world();
        let victim = world
            .add_actor(
                Actor::new("victim", Pos::new(1, 1, 0), 10.0, 1.0)
                    .with_controller(Box::new(Idler)),
            )
            .unwrap();
        world
            .add_actor(
                Actor::new("assassin", Pos::new(2, 1, 0), 10.0, 1.0)
                    .with_controller(Box::new(Assassin { target: victim })),
            )
            .unwrap();
        world.add_actor(scripted_actor("witness", 3, 1.0, 1)).unwrap();

        assert_eq!(world.update(), RoundResult::Paused);
        assert!(world.actor(victim).is_none());
        let journal = world.take_journal();
        let witnessed = journal.iter().filter(|l| l.contains("witness acts.")).count();
        assert_eq!(witnessed, 1);
    }

    #[test]
    fn test_actors_without_controllers_never_take_turns() {
        let mut world = open_world();
        let statue = world
            .add_actor(Actor::new("statue", Pos::new(1, 1, 0), 10.0, 1.0))
            .unwrap();

        // Alone, a bare actor means nothing can act.
        assert_eq!(world.update(), RoundResult::Done);
        assert_eq!(world.actor(statue).unwrap().next_turn(), 0.0);

        // Alongside a controlled actor it still never moves its clock.
        world.add_actor(scripted_actor("walker", 2, 1.0, 2)).unwrap();
        assert_eq!(world.update(), RoundResult::Paused);
        assert_eq!(world.actor(statue).unwrap().next_turn(), 0.0);
        assert_eq!(world.turns(), 2);
    }

    #[test]
    fn test_paused_round_resumes_with_timestamps_intact() {
        let mut world = open_world();
        let a = world.add_actor(scripted_actor("pacer", 1, 1.0, 2)).unwrap();

        assert_eq!(world.update(), RoundResult::Paused);
        assert_eq!(world.actor(a).unwrap().next_turn(), 2.0);

        // Refill the budget through the controller and resume.
        let controller = world.actor_mut(a).unwrap().controller_mut().unwrap();
        controller.downcast_mut::<Scripted>().unwrap().left = 1;
        assert_eq!(world.update(), RoundResult::Paused);
        assert_eq!(world.actor(a).unwrap().next_turn(), 3.0);
        assert_eq!(world.turns(), 3);
    }

    #[test]
    fn test_add_actor_is_rejected_mid_round() {
        struct Spawner;
        impl Controller for Spawner {
            fn act(&mut self, world: &mut World, me: ActorId) -> bool {
                let spawn = Actor::new("intruder", Pos::new(5, 5, 0), 10.0, 1.0);
                assert!(matches!(
                    world.add_actor(spawn),
                    Err(crate::world::WorldError::MutationDuringRound)
                ));
                world.end_turn(me);
                false
            }
        }

        let mut world = open_world();
        world
            .add_actor(
                Actor::new("spawner", Pos::new(1, 1, 0), 10.0, 1.0)
                    .with_controller(Box::new(Spawner)),
            )
            .unwrap();
        assert_eq!(world.update(), RoundResult::Paused);
        assert_eq!(world.actor_count(), 1);
    }

    #[test]
    fn test_clock_tracks_the_selected_actor() {
        let mut world = open_world();
        world.add_actor(scripted_actor("quick", 1, 1.0, 3)).unwrap();
        world.add_actor(scripted_actor("slow", 2, 5.0, 1)).unwrap();

        world.update();
        // Quick was offered its turn at t=3 and declined there.
        assert_eq!(world.clock(), 3.0);
    }
}
