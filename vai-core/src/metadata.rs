//! Stream-level metadata for a parsed VAI container.

/// Immutable properties of a VAI stream, fixed once the header is parsed.
///
/// `total_frames` and `duration_ms` are stored independently in the format
/// and are only consistent up to rounding: `total_frames` is authoritative
/// for frame/seek bounds, `duration_ms` for end-of-stream and position
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerMetadata {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frame rate numerator
    pub fps_num: u32,
    /// Frame rate denominator
    pub fps_den: u32,
    /// Total duration in milliseconds
    pub duration_ms: u64,
    /// Number of frames in the index
    pub total_frames: u64,
}

impl ContainerMetadata {
    /// Frame rate as a float. The parser guarantees `fps_num > 0` and
    /// `fps_den > 0`, so this is always finite and positive.
    pub fn fps(&self) -> f64 {
        self.fps_num as f64 / self.fps_den as f64
    }

    /// Size in bytes of one decoded RGBA frame (`width * height * 4`).
    pub fn frame_size_bytes(&self) -> u64 {
        self.width as u64 * self.height as u64 * 4
    }

    /// Maps a millisecond timestamp to the frame number covering it:
    /// `floor(t_ms * fps / 1000)`, computed exactly in integer math and
    /// saturating at `u64::MAX` (extreme headers still parse, and a
    /// saturated frame number clamps at the seek boundary instead of
    /// wrapping back into the stream).
    ///
    /// The playback cursor and the renderer must agree on this rounding
    /// rule, so both go through this single conversion.
    pub fn frame_at_time(&self, timestamp_ms: u64) -> u64 {
        let num = timestamp_ms as u128 * self.fps_num as u128;
        let den = 1000 * self.fps_den as u128;
        u64::try_from(num / den).unwrap_or(u64::MAX)
    }

    /// Maps a frame number to its start timestamp in milliseconds:
    /// `floor(frame * 1000 / fps)`, saturating at `u64::MAX`.
    pub fn time_at_frame(&self, frame: u64) -> u64 {
        let num = frame as u128 * 1000 * self.fps_den as u128;
        u64::try_from(num / self.fps_num as u128).unwrap_or(u64::MAX)
    }
}
