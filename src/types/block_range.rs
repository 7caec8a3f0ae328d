// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for block ranges, batch sizes and paginated fetch windows
//!
//! These types keep block numbers, batch sizes and page numbers from being
//! confused with each other at call sites that take several `u64`s.

use serde::{Deserialize, Serialize};

/// Inclusive block range handed to the explorer (`startblock`..=`endblock`)
///
/// # Examples
///
/// ```
/// use txhistory::BlockRange;
///
/// let range = BlockRange::new(0, 999_999_999);
/// assert_eq!(range.start_block(), 0);
/// assert_eq!(range.end_block(), 999_999_999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    start_block: u64,
    end_block: u64,
}

impl BlockRange {
    /// Create a new block range
    pub const fn new(start_block: u64, end_block: u64) -> Self {
        Self {
            start_block,
            end_block,
        }
    }

    /// First block of the range
    pub const fn start_block(&self) -> u64 {
        self.start_block
    }

    /// Last block of the range
    pub const fn end_block(&self) -> u64 {
        self.end_block
    }

    /// Number of blocks between start and end (`end - start`)
    pub const fn span(&self) -> u64 {
        self.end_block.saturating_sub(self.start_block)
    }
}

impl std::fmt::Display for BlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_block, self.end_block)
    }
}

/// Number of blocks processed per chunk in batch mode
///
/// # Examples
///
/// ```
/// use txhistory::{BatchSize, BlockRange};
///
/// let batch = BatchSize::new(1000);
/// let chunks: Vec<_> = batch.chunk_range(BlockRange::new(0, 2500)).collect();
///
/// assert_eq!(chunks.len(), 3);
/// assert_eq!((chunks[0].start(), chunks[0].end()), (0, 1000));
/// assert_eq!((chunks[2].start(), chunks[2].end()), (2000, 2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchSize(u64);

impl BatchSize {
    /// Create a new batch size
    pub const fn new(blocks: u64) -> Self {
        Self(blocks)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Split `[start, end)` into consecutive half-open chunks
    ///
    /// Every chunk spans `self` blocks except the last, which is clipped to
    /// the range's end block. A zero batch size yields no chunks.
    pub fn chunk_range(&self, range: BlockRange) -> ChunkIterator {
        ChunkIterator {
            current: range.start_block,
            end: range.end_block,
            chunk_size: self.0,
        }
    }
}

impl From<u64> for BatchSize {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for BatchSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} blocks", self.0)
    }
}

/// One half-open chunk `[start, end)` of a batched block range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockChunk {
    start: u64,
    end: u64,
    is_last: bool,
}

impl BlockChunk {
    /// First block of the chunk
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end of the chunk
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Whether this chunk is the final one of its range
    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// The inclusive block range to request from the explorer for this chunk
    ///
    /// Interior chunks stop one block before `end` so neighbouring chunks never
    /// request the same block. The last chunk includes `end`, matching the
    /// inclusive end block of a whole-range fetch.
    pub const fn fetch_range(&self) -> BlockRange {
        if self.is_last {
            BlockRange::new(self.start, self.end)
        } else {
            BlockRange::new(self.start, self.end - 1)
        }
    }
}

impl std::fmt::Display for BlockChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Iterator over half-open block chunks
///
/// Created by [`BatchSize::chunk_range`].
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    current: u64,
    end: u64,
    chunk_size: u64,
}

impl Iterator for ChunkIterator {
    type Item = BlockChunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.chunk_size == 0 || self.current >= self.end {
            return None;
        }

        let chunk_start = self.current;
        let chunk_end = chunk_start.saturating_add(self.chunk_size).min(self.end);
        self.current = chunk_end;

        Some(BlockChunk {
            start: chunk_start,
            end: chunk_end,
            is_last: chunk_end == self.end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.chunk_size == 0 || self.current >= self.end {
            (0, Some(0))
        } else {
            let chunks = (self.end - self.current).div_ceil(self.chunk_size) as usize;
            (chunks, Some(chunks))
        }
    }
}

impl ExactSizeIterator for ChunkIterator {}

/// One paginated explorer request: block bounds plus page coordinates
///
/// Pages are 1-based, as the explorer numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First block (inclusive)
    pub start_block: u64,
    /// Last block (inclusive)
    pub end_block: u64,
    /// 1-based page number
    pub page: u32,
    /// Records per page (the explorer's `offset`)
    pub page_size: u32,
}

impl FetchWindow {
    /// The first page of a block range
    pub const fn first_page(range: BlockRange, page_size: u32) -> Self {
        Self {
            start_block: range.start_block(),
            end_block: range.end_block(),
            page: 1,
            page_size,
        }
    }

    /// The same window advanced by one page
    pub const fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(batch: u64, start: u64, end: u64) -> Vec<(u64, u64)> {
        BatchSize::new(batch)
            .chunk_range(BlockRange::new(start, end))
            .map(|c| (c.start(), c.end()))
            .collect()
    }

    #[test]
    fn test_chunk_range_exact_multiple() {
        assert_eq!(bounds(100, 0, 300), vec![(0, 100), (100, 200), (200, 300)]);
    }

    #[test]
    fn test_chunk_range_clips_final_chunk() {
        assert_eq!(bounds(30, 0, 99), vec![(0, 30), (30, 60), (60, 90), (90, 99)]);
    }

    #[test]
    fn test_chunk_range_larger_than_range() {
        assert_eq!(bounds(1_000_000, 10, 20), vec![(10, 20)]);
    }

    #[test]
    fn test_chunk_range_empty() {
        assert!(bounds(100, 50, 50).is_empty());
        assert!(bounds(100, 60, 50).is_empty());
        assert!(bounds(0, 0, 100).is_empty());
    }

    #[test]
    fn test_chunk_range_near_u64_max() {
        let chunks = bounds(10, u64::MAX - 15, u64::MAX);
        assert_eq!(
            chunks,
            vec![(u64::MAX - 15, u64::MAX - 5), (u64::MAX - 5, u64::MAX)]
        );
    }

    #[test]
    fn test_only_last_chunk_is_marked() {
        let chunks: Vec<_> = BatchSize::new(100)
            .chunk_range(BlockRange::new(0, 250))
            .collect();
        let flags: Vec<bool> = chunks.iter().map(|c| c.is_last()).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_fetch_ranges_do_not_overlap() {
        let ranges: Vec<BlockRange> = BatchSize::new(100)
            .chunk_range(BlockRange::new(0, 250))
            .map(|c| c.fetch_range())
            .collect();
        assert_eq!(
            ranges,
            vec![
                BlockRange::new(0, 99),
                BlockRange::new(100, 199),
                BlockRange::new(200, 250),
            ]
        );
    }

    #[test]
    fn test_chunk_count_matches_iteration() {
        let batch = BatchSize::new(1000);
        for (start, end) in [(0, 2500), (0, 1000), (5, 6), (10, 10), (0, 999_999)] {
            let chunks = batch.chunk_range(BlockRange::new(start, end));
            assert_eq!(chunks.len(), chunks.clone().count());
        }
    }

    #[test]
    fn test_fetch_window_pages() {
        let window = FetchWindow::first_page(BlockRange::new(5, 10), 1000);
        assert_eq!(window.page, 1);
        let next = window.next_page();
        assert_eq!(next.page, 2);
        assert_eq!(next.start_block, 5);
        assert_eq!(next.end_block, 10);
        assert_eq!(next.page_size, 1000);
    }

    #[test]
    fn test_block_range_span() {
        assert_eq!(BlockRange::new(100, 250).span(), 150);
        assert_eq!(BlockRange::new(250, 100).span(), 0);
        assert_eq!(BlockRange::new(1, 2).to_string(), "1-2");
    }
}
