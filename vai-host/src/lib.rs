//! Host-facing adapter around decoder sessions.
//!
//! A media-player host integration talks to the engine through three
//! things: a cheap [`probe`] over the magic bytes, a [`SessionRegistry`]
//! handing out opaque [`SessionId`]s instead of raw ownership, and a
//! closed set of [`ControlRequest`] variants covering the host's
//! position/time queries. The host-side plugin ABI itself lives outside
//! this workspace; whatever shape it takes, this surface is what it
//! calls into. Nothing here depends on host types.

pub mod control;

pub use control::{ControlRequest, ControlResponse};

use std::collections::HashMap;
use vai_core::{ParseError, MAGIC};
use vai_decoder::{RenderError, Session};

/// Decides whether `bytes` even look like a VAI container, reading only
/// the 4 magic bytes. Hosts call this before committing to an open.
pub fn probe(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] == MAGIC
}

/// Opaque key the host holds instead of a session pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// Stream properties reported to the host on open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps_num: u32,
    pub fps_den: u32,
    pub duration_ms: u64,
    pub total_frames: u64,
    pub fps: f64,
}

/// Outcome of a render request, as the host sees it: end-of-stream is a
/// normal stop signal, everything else in `Failed` is a contract
/// violation worth aborting the session over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered,
    EndOfStream,
    Failed(RenderError),
}

/// Owns every open session, keyed by [`SessionId`].
///
/// `open` inserts, `close` removes; operations on an id that was never
/// issued or already closed return `None`/`false`. The registry itself
/// is single-threaded like the sessions it holds.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<u64, Session>,
    next_id: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` and registers a new session.
    pub fn open(&mut self, bytes: &[u8]) -> Result<(SessionId, StreamInfo), ParseError> {
        let session = Session::open(bytes)?;
        let meta = session.metadata();
        let info = StreamInfo {
            width: meta.width,
            height: meta.height,
            fps_num: meta.fps_num,
            fps_den: meta.fps_den,
            duration_ms: meta.duration_ms,
            total_frames: meta.total_frames,
            fps: meta.fps(),
        };

        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, session);
        tracing::debug!(id, "registered session");
        Ok((SessionId(id), info))
    }

    /// Drops the session; later calls with this id see `None`. Returns
    /// whether anything was actually closed.
    pub fn close(&mut self, id: SessionId) -> bool {
        let closed = self.sessions.remove(&id.0).is_some();
        if closed {
            tracing::debug!(id = id.0, "closed session");
        }
        closed
    }

    /// Renders the frame covering `timestamp_ms` into `out`. Rendering
    /// never moves a session's cursor.
    pub fn render(&self, id: SessionId, timestamp_ms: u64, out: &mut [u8]) -> Option<RenderStatus> {
        let session = self.sessions.get(&id.0)?;
        Some(match session.render(timestamp_ms, out) {
            Ok(()) => RenderStatus::Rendered,
            Err(RenderError::EndOfStream) => RenderStatus::EndOfStream,
            Err(err) => RenderStatus::Failed(err),
        })
    }

    pub fn seek_frame(&mut self, id: SessionId, frame: u64) -> bool {
        match self.sessions.get_mut(&id.0) {
            Some(session) => {
                session.seek_to_frame(frame);
                true
            }
            None => false,
        }
    }

    pub fn advance(&mut self, id: SessionId) -> bool {
        match self.sessions.get_mut(&id.0) {
            Some(session) => {
                session.advance();
                true
            }
            None => false,
        }
    }

    pub fn current_frame(&self, id: SessionId) -> Option<u64> {
        self.sessions.get(&id.0).map(Session::current_frame)
    }

    /// Resolves one of the host's control queries against a session.
    pub fn control(&mut self, id: SessionId, request: ControlRequest) -> Option<ControlResponse> {
        self.sessions
            .get_mut(&id.0)
            .map(|session| control::dispatch(session, request))
    }

    /// Number of currently open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
