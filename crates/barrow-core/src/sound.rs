//! Sound events broadcast to controllers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geom::Pos;

/// Category of a sound event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum SoundKind {
    /// Someone walking nearby
    Footsteps = 0,

    /// Weapons meeting
    Clash = 1,

    /// A voice raised on purpose
    Shout = 2,

    /// Low vibration through the ground
    Rumble = 3,

    /// Something breaking
    Shatter = 4,

    /// Spellcasting
    Chant = 5,
}

/// A single sound event.
///
/// Immutable once made; every controller sees the same value. `felt` sounds
/// travel through the ground rather than the air, which controllers may treat
/// as carrying further or bypassing deafness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sound {
    pub kind: SoundKind,
    pub origin: Pos,
    pub felt: bool,
}

impl Sound {
    /// An airborne sound.
    pub fn heard(kind: SoundKind, origin: Pos) -> Self {
        Self {
            kind,
            origin,
            felt: false,
        }
    }

    /// A ground vibration.
    pub fn felt(kind: SoundKind, origin: Pos) -> Self {
        Self {
            kind,
            origin,
            felt: true,
        }
    }
}
