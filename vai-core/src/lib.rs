//! VAI Core Library
//!
//! This library provides the container parser and core data structures for
//! the VAI sprite-sheet video format: a fixed-layout header, a frame index
//! mapping frame numbers to payload byte ranges, and the retained pixel
//! payload. Parsing consumes a fully materialized byte buffer; there is no
//! streaming input.

pub mod container;
pub mod index;
pub mod metadata;

pub use container::{ParsedContainer, VaiHeader, DEFAULT_MAX_CONTAINER_BYTES, MAGIC};
pub use index::{FrameEntry, FrameIndex};
pub use metadata::ContainerMetadata;

/// Result type for vai-core operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced while parsing a VAI container.
///
/// A parse failure never yields a partial container; callers either get an
/// owned [`ParsedContainer`] or one of these.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The buffer does not start with the VAI magic bytes. This is the
    /// cheap probe hosts use to decide whether to attempt an open at all.
    #[error("not a VAI container (bad magic bytes)")]
    NotAVaiContainer,

    #[error("unsupported VAI version: {0}")]
    UnsupportedVersion(u16),

    /// The buffer ended before the declared header or frame index did.
    #[error("container truncated at byte {0}")]
    Truncated(usize),

    /// Header fields or index entries violate the format's invariants.
    #[error("corrupt container: {0}")]
    CorruptIndex(String),

    #[error("container is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },
}
