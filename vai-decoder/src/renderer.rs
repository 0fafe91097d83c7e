//! Copies a frame's pixels into a caller-supplied buffer.

use crate::{FrameStore, RenderError, Result};

/// Renders the frame covering `timestamp_ms` into `out`.
///
/// `EndOfStream` when `timestamp_ms` is at or past the stream's duration,
/// or when the mapped frame falls outside the index (duration and frame
/// count are stored independently; the frame count wins for bounds). On
/// any error, `out` is left untouched.
pub fn render_into(store: &FrameStore, timestamp_ms: u64, out: &mut [u8]) -> Result<()> {
    let meta = store.metadata();
    if timestamp_ms >= meta.duration_ms {
        return Err(RenderError::EndOfStream);
    }

    let frame = meta.frame_at_time(timestamp_ms);
    if frame >= meta.total_frames {
        return Err(RenderError::EndOfStream);
    }

    render_frame_into(store, frame, out)
}

/// Renders frame `frame` into `out`.
///
/// Writes exactly `width * height * 4` bytes (RGBA, row-major, no
/// padding) and never touches `out` beyond that range. Fails with
/// `BufferTooSmall` before writing anything if `out` cannot hold one
/// frame.
pub fn render_frame_into(store: &FrameStore, frame: u64, out: &mut [u8]) -> Result<()> {
    let needed = store.metadata().frame_size_bytes();
    if (out.len() as u64) < needed {
        return Err(RenderError::BufferTooSmall {
            len: out.len(),
            needed: needed as usize,
        });
    }

    let pixels = store.pixels_for(frame)?;
    out[..pixels.len()].copy_from_slice(pixels);
    Ok(())
}
