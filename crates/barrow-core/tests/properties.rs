//! Numeric invariants checked over generated inputs.

use barrow_core::{Actor, DamageType, FlatStats, Pos, StatBlock, mitigated};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mitigation_never_negative_and_never_amplifies(
        amount in 0.0f64..1e9,
        defence in 0.0f64..=1.0,
    ) {
        let dealt = mitigated(amount, defence);
        prop_assert!(dealt >= 0.0);
        prop_assert!(dealt <= amount);
    }

    #[test]
    fn negative_defence_amplifies(
        amount in 0.0f64..1e9,
        defence in -4.0f64..0.0,
    ) {
        prop_assert!(mitigated(amount, defence) >= amount);
    }

    #[test]
    fn regen_never_overshoots_max(
        max in 1.0f64..1e4,
        wound in 0.0f64..1.0,
        regen in 0.0f64..1e5,
        rounds in 1usize..20,
    ) {
        let mut actor = Actor::new("subject", Pos::new(1, 1, 0), max, 1.0);
        let stats = FlatStats(StatBlock { regen, ..Default::default() });
        actor.take_damage(max * wound, DamageType::Physical, &stats);
        for _ in 0..rounds {
            actor.end_turn(&stats);
            prop_assert!(actor.hp() <= max);
        }
        prop_assert!(actor.is_alive());
    }

    #[test]
    fn clock_only_moves_forward(
        delay in 0.01f64..50.0,
        speed in 0.0f64..8.0,
        steps in 1usize..50,
    ) {
        let mut actor = Actor::new("subject", Pos::new(1, 1, 0), 10.0, delay);
        let stats = FlatStats(StatBlock { speed, ..Default::default() });
        let mut last = actor.next_turn();
        for _ in 0..steps {
            actor.end_turn(&stats);
            prop_assert!(actor.next_turn() > last);
            prop_assert!(actor.next_turn().is_finite());
            last = actor.next_turn();
        }
    }
}
