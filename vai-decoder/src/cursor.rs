//! Playback position state machine.

use vai_core::ContainerMetadata;

/// Mutable "current frame" driving sequential playback.
///
/// The position lives in `[0, total_frames]`; the value `total_frames`
/// itself is the end-of-stream sentinel, observable via [`at_end`] and
/// distinct from every valid frame. EOF is a position, not a teardown.
///
/// [`at_end`]: PlaybackCursor::at_end
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    metadata: ContainerMetadata,
    current_frame: u64,
}

impl PlaybackCursor {
    /// Creates a cursor positioned at frame 0.
    pub fn new(metadata: ContainerMetadata) -> Self {
        Self {
            metadata,
            current_frame: 0,
        }
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    /// Start timestamp of the current frame in milliseconds.
    pub fn current_time_ms(&self) -> u64 {
        self.metadata.time_at_frame(self.current_frame)
    }

    /// True once the cursor sits on the end-of-stream sentinel.
    pub fn at_end(&self) -> bool {
        self.current_frame >= self.metadata.total_frames
    }

    /// Positions the cursor on `frame`, clamped to the last valid frame.
    /// An empty stream keeps the cursor at 0.
    pub fn seek_to_frame(&mut self, frame: u64) {
        self.current_frame = frame.min(self.metadata.total_frames.saturating_sub(1));
        tracing::trace!(frame = self.current_frame, "cursor seek");
    }

    /// Positions the cursor on the frame covering `timestamp_ms`, using
    /// the same time-to-frame mapping as the renderer.
    pub fn seek_to_time(&mut self, timestamp_ms: u64) {
        self.seek_to_frame(self.metadata.frame_at_time(timestamp_ms));
    }

    /// Steps one frame forward, saturating at the end-of-stream sentinel;
    /// advancing past the end again is a no-op.
    pub fn advance(&mut self) {
        self.current_frame = (self.current_frame + 1).min(self.metadata.total_frames);
    }
}
