//! Error type shared by the fallible entry points of the crate.
//!
//! Only programmer errors surface here. Geometric degeneracy (zero-length
//! separation vectors, collapsed bones) and unreachable IK targets are handled
//! locally by the solvers and never produce an error.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicsError {
    /// A two-bone IK chain was given the wrong number of joints.
    InvalidChain {
        /// Number of joints a two-bone chain requires (always 3).
        expected: usize,
        /// Number of joints that were actually supplied.
        found: usize,
    },
    /// A collider world matrix could not be inverted.
    SingularTransform,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChain { expected, found } => write!(
                f,
                "two-bone chain expects {expected} joint positions, got {found}"
            ),
            Self::SingularTransform => write!(f, "collider world transform is not invertible"),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_chain_message_names_both_counts() {
        let err = PhysicsError::InvalidChain {
            expected: 3,
            found: 4,
        };
        let text = err.to_string();
        assert!(text.contains('3'));
        assert!(text.contains('4'));
    }
}
