//! VAI Decoder Library
//!
//! Turns a parsed VAI container into frame-accurate, seekable playback:
//! random-access pixel lookup ([`FrameStore`]), a playback position state
//! machine ([`PlaybackCursor`]), a renderer filling caller-supplied RGBA
//! buffers, and [`Session`] tying the three together behind the narrow
//! surface a host integration needs.
//!
//! Everything here is synchronous and single-threaded: calls complete
//! before returning, and the caller serializes access to a session.
//! Independent sessions share no mutable state.

pub mod cursor;
pub mod frame_store;
pub mod renderer;
pub mod session;

pub use cursor::PlaybackCursor;
pub use frame_store::FrameStore;
pub use renderer::{render_frame_into, render_into};
pub use session::Session;

/// Result type for vai-decoder operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors produced while looking up or rendering frames.
///
/// [`RenderError::EndOfStream`] is a normal playback signal ("no frame at
/// or after this time"), not a corruption error; hosts stop delivering
/// frames rather than tearing the session down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("frame {frame} out of range, stream has {total_frames} frames")]
    FrameOutOfRange { frame: u64, total_frames: u64 },

    #[error("output buffer holds {len} bytes, frame needs {needed}")]
    BufferTooSmall { len: usize, needed: usize },

    #[error("end of stream")]
    EndOfStream,
}
