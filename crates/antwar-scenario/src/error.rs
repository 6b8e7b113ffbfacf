//! Errors raised while reading a scenario.

use thiserror::Error;

/// Failure to produce a `ScenarioData` at all.
///
/// Problems confined to a single row never surface here; the row is skipped.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario is missing the [{0}] section")]
    MissingSection(String),

    #[error("[{section}] {key}: expected a number, found {value:?}")]
    MalformedNumber {
        section: String,
        key: String,
        value: String,
    },
}

/// Failure to decode a `[MapPack]` or `[OverlayPack]` payload.
#[derive(Debug, Error)]
pub enum MapPackError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("chunk at byte {offset} is truncated")]
    TruncatedChunk { offset: usize },

    #[error("LCW stream ended inside an opcode at byte {offset}")]
    TruncatedStream { offset: usize },

    #[error("LCW back-reference to {position} is outside the {len} bytes decoded so far")]
    InvalidBackReference { position: usize, len: usize },

    #[error("LCW chunk expands past {limit} bytes")]
    ChunkOverflow { limit: usize },

    #[error("decoded {actual} bytes, expected one of {expected:?}")]
    SizeMismatch { expected: Vec<usize>, actual: usize },
}
