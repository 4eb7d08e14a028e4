//! barrow-core: turn scheduling and actor simulation.
//!
//! This crate contains the whole simulation with no I/O dependencies: a
//! world of actors on a tile grid, advanced by a timestamp scheduler in
//! which fast actors act more often than slow ones. An embedder drives it
//! by calling [`World::update`] repeatedly and feeding player input to the
//! relevant controller whenever the round pauses.

pub mod actor;
pub mod config;
pub mod controller;
pub mod damage;
pub mod geom;
pub mod grid;
pub mod roster;
pub mod sound;
pub mod stats;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use rng::SimRng;

pub use actor::{Actor, ActorId};
pub use config::{ConfigError, SimConfig};
pub use controller::{Command, Controller, HunterController, PlayerController, WandererController};
pub use damage::{DamageType, mitigated};
pub use geom::{Direction, Pos};
pub use grid::{Terrain, TileGrid, TileKind};
pub use sound::{Sound, SoundKind};
pub use stats::{FlatStats, LoadoutStats, Resistances, StatBlock, StatSource};
pub use world::{RoundResult, World, WorldError};
