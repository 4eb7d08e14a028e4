//! Core simulation constants.

/// Default grid dimensions
pub const DEFAULT_WIDTH: i32 = 48;
pub const DEFAULT_HEIGHT: i32 = 24;
pub const DEFAULT_LAYERS: i32 = 1;

/// Default per-action delay before the speed divisor is applied
pub const DEFAULT_TURN_DELAY: f64 = 1.0;

/// Floor applied to effective speed so the clock always advances
pub const MIN_SPEED: f64 = 0.05;

/// Defence bonus granted by a matching damage resistance
pub const RESIST_BONUS: f64 = 0.5;

/// Radius within which controllers notice heard sounds
pub const DEFAULT_EARSHOT: i32 = 12;

/// Felt sounds carry through the ground this many times further than heard ones
pub const FELT_RANGE_FACTOR: i32 = 2;
