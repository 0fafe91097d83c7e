//! One open container plus its playback cursor.

use crate::{renderer, FrameStore, PlaybackCursor, RenderError, Result};
use vai_core::{ContainerMetadata, ParseError, ParsedContainer};

/// An open, decoded instance of a VAI container.
///
/// The session exclusively owns the parsed container (via its
/// [`FrameStore`]) and the mutable [`PlaybackCursor`]; dropping the
/// session releases both as one unit. Rendering never moves the cursor —
/// advancing is a separate, explicit call, so a paused host can repaint
/// the same frame and seeks share the render path with sequential
/// playback.
///
/// Sessions are not synchronized internally: the caller serializes calls
/// against one session. Independent sessions share nothing and may be
/// used concurrently.
#[derive(Debug)]
pub struct Session {
    store: FrameStore,
    cursor: PlaybackCursor,
}

impl Session {
    /// Parses `bytes` and opens a session positioned at frame 0.
    ///
    /// A parse failure returns the error and no session.
    pub fn open(bytes: &[u8]) -> std::result::Result<Self, ParseError> {
        Self::from_container(ParsedContainer::parse(bytes)?)
    }

    /// Like [`Session::open`] with a caller-chosen container size limit.
    pub fn open_with_limit(bytes: &[u8], max_bytes: usize) -> std::result::Result<Self, ParseError> {
        Self::from_container(ParsedContainer::parse_with_limit(bytes, max_bytes)?)
    }

    fn from_container(container: ParsedContainer) -> std::result::Result<Self, ParseError> {
        let cursor = PlaybackCursor::new(*container.metadata());
        tracing::debug!(
            width = container.metadata().width,
            height = container.metadata().height,
            total_frames = container.metadata().total_frames,
            "session opened"
        );
        Ok(Self {
            store: FrameStore::new(container),
            cursor,
        })
    }

    pub fn metadata(&self) -> &ContainerMetadata {
        self.store.metadata()
    }

    /// Renders the frame covering `timestamp_ms`; the cursor is untouched.
    pub fn render(&self, timestamp_ms: u64, out: &mut [u8]) -> Result<()> {
        renderer::render_into(&self.store, timestamp_ms, out)
    }

    /// Renders the frame the cursor currently sits on; `EndOfStream` at
    /// the end-of-stream sentinel.
    pub fn render_current(&self, out: &mut [u8]) -> Result<()> {
        if self.cursor.at_end() {
            return Err(RenderError::EndOfStream);
        }
        renderer::render_frame_into(&self.store, self.cursor.current_frame(), out)
    }

    /// Direct pixel access for the given frame, bypassing the cursor.
    pub fn pixels_for(&self, frame: u64) -> Result<&[u8]> {
        self.store.pixels_for(frame)
    }

    pub fn seek_to_frame(&mut self, frame: u64) {
        self.cursor.seek_to_frame(frame);
    }

    pub fn seek_to_time(&mut self, timestamp_ms: u64) {
        self.cursor.seek_to_time(timestamp_ms);
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn current_frame(&self) -> u64 {
        self.cursor.current_frame()
    }

    pub fn current_time_ms(&self) -> u64 {
        self.cursor.current_time_ms()
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }
}
