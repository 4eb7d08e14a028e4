//! Damage categories and the mitigation rule.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Damage type - what kind of harm an attack deals.
///
/// Resistances and defence lookups key off this.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum DamageType {
    /// Blades, claws, falling rocks
    #[default]
    Physical = 0,

    /// Burning
    Fire = 1,

    /// Freezing
    Frost = 2,

    /// Poison and acid
    Venom = 3,

    /// Lightning
    Shock = 4,

    /// Raw spell damage
    Arcane = 5,
}

/// Apply a defence fraction to a raw damage amount.
///
/// Defence of 1.0 or more means immunity; the result never goes negative,
/// so an attack cannot heal. Negative defence amplifies the hit.
pub fn mitigated(amount: f64, defence: f64) -> f64 {
    (amount * (1.0 - defence)).max(0.0)
}
