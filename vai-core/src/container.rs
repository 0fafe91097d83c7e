//! VAI container parsing.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! magic "VAI\0" | version u16 | width u32 | height u32 | fps_num u32 |
//! fps_den u32 | duration_ms u64 | total_frames u64 |
//! frame index (total_frames x { offset u64, len u32 }) | pixel payload
//! ```
//!
//! Index offsets are relative to the payload region. Payload blocks are raw
//! RGBA, row-major, exactly `width * height * 4` bytes per frame; entries
//! may alias the same block so repeated frames are stored once.

use crate::{ContainerMetadata, FrameEntry, FrameIndex, ParseError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Magic bytes for VAI format: "VAI\0"
pub const MAGIC: [u8; 4] = [b'V', b'A', b'I', 0];

/// Current VAI format version
const VERSION: u16 = 2;

/// Default cap on accepted container size. Deployments with different
/// memory budgets pass their own limit to [`ParsedContainer::parse_with_limit`].
pub const DEFAULT_MAX_CONTAINER_BYTES: usize = 256 * 1024 * 1024;

const HEADER_LEN: usize = 38;
const INDEX_ENTRY_LEN: usize = 12;

/// VAI file header
#[derive(Debug, Clone, Copy)]
pub struct VaiHeader {
    /// Format version
    pub version: u16,
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

impl VaiHeader {
    /// Reads and validates the fixed-layout header.
    fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|_| ParseError::NotAVaiContainer)?;
        if magic != MAGIC {
            return Err(ParseError::NotAVaiContainer);
        }

        let version = read_u16(cursor)?;
        if version != VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }

        Ok(Self {
            version,
            width: read_u32(cursor)?,
            height: read_u32(cursor)?,
            fps_num: read_u32(cursor)?,
            fps_den: read_u32(cursor)?,
            duration_ms: read_u64(cursor)?,
            total_frames: read_u64(cursor)?,
        })
    }

    /// Stream metadata carried by this header.
    pub fn metadata(&self) -> ContainerMetadata {
        ContainerMetadata {
            width: self.width,
            height: self.height,
            fps_num: self.fps_num,
            fps_den: self.fps_den,
            duration_ms: self.duration_ms,
            total_frames: self.total_frames,
        }
    }
}

// The cursor reads an in-memory slice, so the only possible failure is
// running off the end of the buffer.
fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16> {
    let at = cursor.position() as usize;
    cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| ParseError::Truncated(at))
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    let at = cursor.position() as usize;
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| ParseError::Truncated(at))
}

fn read_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    let at = cursor.position() as usize;
    cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| ParseError::Truncated(at))
}

/// A fully parsed, immutable VAI container: metadata, frame index and the
/// retained pixel payload. Exclusively owned by the session opened on it.
#[derive(Debug, Clone)]
pub struct ParsedContainer {
    metadata: ContainerMetadata,
    index: FrameIndex,
    payload: Vec<u8>,
}

impl ParsedContainer {
    /// Parses a container from raw bytes with the default size limit.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with_limit(bytes, DEFAULT_MAX_CONTAINER_BYTES)
    }

    /// Parses a container, rejecting buffers larger than `max_bytes`.
    ///
    /// Single pass over header and index; every declared byte range is
    /// bounds-checked before the payload is retained, so later frame
    /// lookups never read out of bounds.
    pub fn parse_with_limit(bytes: &[u8], max_bytes: usize) -> Result<Self> {
        if bytes.len() > max_bytes {
            return Err(ParseError::TooLarge {
                len: bytes.len(),
                limit: max_bytes,
            });
        }

        let mut cursor = Cursor::new(bytes);
        let header = VaiHeader::read(&mut cursor)?;
        let metadata = header.metadata();

        if metadata.width == 0 || metadata.height == 0 {
            return Err(ParseError::CorruptIndex(format!(
                "invalid frame dimensions {}x{}",
                metadata.width, metadata.height
            )));
        }
        if metadata.fps_num == 0 || metadata.fps_den == 0 {
            return Err(ParseError::CorruptIndex(format!(
                "invalid frame rate {}/{}",
                metadata.fps_num, metadata.fps_den
            )));
        }

        // The index must fit in the buffer before any entry is read.
        let remaining = (bytes.len() - HEADER_LEN) as u128;
        let index_bytes = metadata.total_frames as u128 * INDEX_ENTRY_LEN as u128;
        if index_bytes > remaining {
            return Err(ParseError::Truncated(bytes.len()));
        }

        let mut entries = Vec::with_capacity(metadata.total_frames as usize);
        for _ in 0..metadata.total_frames {
            let offset = read_u64(&mut cursor)?;
            let len = read_u32(&mut cursor)?;
            entries.push(FrameEntry { offset, len });
        }

        let payload_start = HEADER_LEN + index_bytes as usize;
        let payload = bytes[payload_start..].to_vec();

        let frame_size = metadata.frame_size_bytes();
        for (frame, entry) in entries.iter().enumerate() {
            if entry.len as u64 != frame_size {
                return Err(ParseError::CorruptIndex(format!(
                    "frame {frame} is {} bytes, expected {frame_size}",
                    entry.len
                )));
            }
            let end = entry
                .offset
                .checked_add(entry.len as u64)
                .filter(|&end| end <= payload.len() as u64);
            if end.is_none() {
                return Err(ParseError::CorruptIndex(format!(
                    "frame {frame} range {}+{} exceeds payload of {} bytes",
                    entry.offset,
                    entry.len,
                    payload.len()
                )));
            }
        }

        tracing::debug!(
            width = metadata.width,
            height = metadata.height,
            total_frames = metadata.total_frames,
            duration_ms = metadata.duration_ms,
            payload_bytes = payload.len(),
            "parsed VAI container"
        );

        Ok(Self {
            metadata,
            index: FrameIndex::new(entries),
            payload,
        })
    }

    /// Stream metadata, immutable after parse.
    pub fn metadata(&self) -> &ContainerMetadata {
        &self.metadata
    }

    /// Frame index, immutable after parse.
    pub fn index(&self) -> &FrameIndex {
        &self.index
    }

    /// Retained pixel payload region. Every index entry's byte range is
    /// guaranteed to lie within this slice.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
