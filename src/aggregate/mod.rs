//! The two ways of assembling an account history.
//!
//! - [`fetch_whole_range`]: one pass over the full range, four concurrent
//!   category fetches, any failure fails the run.
//! - [`RangeBatcher`]: sequential chunks, a failing category only empties its
//!   share of one chunk.

mod batch;
mod whole_range;

pub use batch::{BatchSummary, ChunkFailure, RangeBatcher};
pub use whole_range::fetch_whole_range;
