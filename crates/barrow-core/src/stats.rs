//! Stat aggregation behind the `StatSource` seam.
//!
//! The scheduler never computes speed, defence, or regeneration itself; it
//! asks the world's stat source, passing the actor being evaluated. Embedders
//! can plug in anything from a flat table to an equipment-aware aggregator.

use bitflags::bitflags;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::consts::RESIST_BONUS;
use crate::damage::DamageType;

/// Per-actor derived stats.
pub trait StatSource {
    /// Speed multiplier applied to the actor's turn delay. 1.0 is baseline;
    /// higher is faster.
    fn effective_speed(&self, actor: &Actor) -> f64;

    /// Fraction of incoming damage of `kind` that is absorbed. 0.0 means
    /// none, 1.0 or more means immunity.
    fn defence(&self, actor: &Actor, kind: DamageType) -> f64;

    /// Health restored when the actor ends a turn.
    fn regen_rate(&self, actor: &Actor) -> f64;
}

bitflags! {
    /// Damage types an actor shrugs off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Resistances: u8 {
        const FIRE = 0x01;
        const FROST = 0x02;
        const VENOM = 0x04;
        const SHOCK = 0x08;
        const ARCANE = 0x10;
    }
}

// Manual serde for Resistances
impl Serialize for Resistances {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resistances {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Resistances::from_bits_truncate(bits))
    }
}

impl Resistances {
    /// Check whether a damage type is covered by these resistances.
    ///
    /// Physical damage is never resisted this way; only armour (guard)
    /// blunts it.
    pub fn covers(self, kind: DamageType) -> bool {
        match kind {
            DamageType::Physical => false,
            DamageType::Fire => self.contains(Resistances::FIRE),
            DamageType::Frost => self.contains(Resistances::FROST),
            DamageType::Venom => self.contains(Resistances::VENOM),
            DamageType::Shock => self.contains(Resistances::SHOCK),
            DamageType::Arcane => self.contains(Resistances::ARCANE),
        }
    }
}

/// One actor's stat bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    /// Speed multiplier, 1.0 = baseline
    pub speed: f64,

    /// Flat defence fraction against every damage type
    pub guard: f64,

    /// Health restored per completed turn
    pub regen: f64,

    /// Resisted damage types, each adding `RESIST_BONUS` to defence
    pub resists: Resistances,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            speed: 1.0,
            guard: 0.0,
            regen: 0.0,
            resists: Resistances::empty(),
        }
    }
}

impl StatBlock {
    /// Total defence fraction against a damage type.
    pub fn defence(&self, kind: DamageType) -> f64 {
        if self.resists.covers(kind) {
            self.guard + RESIST_BONUS
        } else {
            self.guard
        }
    }
}

/// The same stat block for every actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatStats(pub StatBlock);

impl StatSource for FlatStats {
    fn effective_speed(&self, _actor: &Actor) -> f64 {
        self.0.speed
    }

    fn defence(&self, _actor: &Actor, kind: DamageType) -> f64 {
        self.0.defence(kind)
    }

    fn regen_rate(&self, _actor: &Actor) -> f64 {
        self.0.regen
    }
}

/// Stat blocks keyed by actor name, with a fallback for everyone else.
///
/// Actors sharing a name share a loadout, the same way a species shares a
/// template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutStats {
    fallback: StatBlock,
    blocks: HashMap<String, StatBlock>,
}

impl LoadoutStats {
    pub fn new(fallback: StatBlock) -> Self {
        Self {
            fallback,
            blocks: HashMap::new(),
        }
    }

    /// Assign a stat block to every actor with this name.
    pub fn set(&mut self, name: impl Into<String>, block: StatBlock) {
        self.blocks.insert(name.into(), block);
    }

    fn block_for(&self, actor: &Actor) -> StatBlock {
        self.blocks
            .get(actor.name())
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl StatSource for LoadoutStats {
    fn effective_speed(&self, actor: &Actor) -> f64 {
        self.block_for(actor).speed
    }

    fn defence(&self, actor: &Actor, kind: DamageType) -> f64 {
        self.block_for(actor).defence(kind)
    }

    fn regen_rate(&self, actor: &Actor) -> f64 {
        self.block_for(actor).regen
    }
}
