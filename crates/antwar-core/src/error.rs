//! Errors shared by crates that parse scenario vocabulary.

use thiserror::Error;

/// A scenario token that does not name anything the simulation knows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("unknown house: {0}")]
    UnknownHouse(String),

    #[error("unknown unit type: {0}")]
    UnknownUnitType(String),
}
