//! Random-access lookup of frame pixels.

use crate::{RenderError, Result};
use vai_core::{ContainerMetadata, ParsedContainer};

/// Owns the parsed container and resolves frame numbers to pixel data.
///
/// Lookup is a pure function of the frame number: any valid frame, in any
/// order, repeatedly. There is no sequential-only state, which is what
/// makes random seeks possible without re-parsing.
#[derive(Debug)]
pub struct FrameStore {
    container: ParsedContainer,
}

impl FrameStore {
    pub fn new(container: ParsedContainer) -> Self {
        Self { container }
    }

    pub fn metadata(&self) -> &ContainerMetadata {
        self.container.metadata()
    }

    /// Read-only RGBA pixels for one frame, exactly
    /// `width * height * 4` bytes, row-major.
    pub fn pixels_for(&self, frame: u64) -> Result<&[u8]> {
        let entry = self
            .container
            .index()
            .get(frame)
            .ok_or(RenderError::FrameOutOfRange {
                frame,
                total_frames: self.metadata().total_frames,
            })?;

        // Entry ranges were bounds-checked at parse time.
        let start = entry.offset as usize;
        let end = start + entry.len as usize;
        Ok(&self.container.payload()[start..end])
    }
}
