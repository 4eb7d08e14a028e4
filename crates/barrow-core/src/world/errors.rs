//! World mutation errors.

use thiserror::Error;

use crate::geom::Pos;

/// Errors from registering actors and reconfiguring a world.
///
/// The turn loop itself never returns these; a controller that asks for an
/// impossible move just gets `false` back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("position {0} is blocked")]
    BlockedSpawn(Pos),

    #[error("the actor set cannot change while a round is running")]
    MutationDuringRound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_position() {
        let err = WorldError::OutOfBounds(Pos::new(-1, 4, 0));
        assert!(err.to_string().contains("(-1, 4)"));

        let err = WorldError::BlockedSpawn(Pos::new(2, 2, 1));
        assert!(err.to_string().contains("(2, 2, L1)"));
    }
}
