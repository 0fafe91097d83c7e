//! Frame index: maps frame numbers to payload byte ranges.

/// Location of one frame's pixel data within the payload region.
///
/// `offset` is relative to the start of the payload, not the container.
/// Multiple entries may point at the same block; duplicate frames share
/// their pixels instead of storing them twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEntry {
    /// Byte offset of the frame's pixels within the payload region
    pub offset: u64,
    /// Length of the frame's pixels in bytes
    pub len: u32,
}

/// Ordered table of frame locations.
///
/// Entries are 0-indexed and contiguous: frame `f` is valid iff
/// `f < len()`, and `get(f)` resolves it in O(1).
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    entries: Vec<FrameEntry>,
}

impl FrameIndex {
    /// Creates an index from already-validated entries.
    pub fn new(entries: Vec<FrameEntry>) -> Self {
        Self { entries }
    }

    /// Number of frames in the index.
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the payload location of frame `frame`.
    pub fn get(&self, frame: u64) -> Option<FrameEntry> {
        usize::try_from(frame)
            .ok()
            .and_then(|i| self.entries.get(i).copied())
    }

    /// Iterates over all entries in frame order.
    pub fn entries(&self) -> impl Iterator<Item = FrameEntry> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_in_and_out_of_range() {
        let index = FrameIndex::new(vec![
            FrameEntry { offset: 0, len: 16 },
            FrameEntry { offset: 16, len: 16 },
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0), Some(FrameEntry { offset: 0, len: 16 }));
        assert_eq!(index.get(1), Some(FrameEntry { offset: 16, len: 16 }));
        assert_eq!(index.get(2), None);
        assert_eq!(index.get(u64::MAX), None);
    }

    #[test]
    fn test_empty_index() {
        let index = FrameIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.get(0), None);
    }
}
