// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across txhistory.
//!
//! This module provides newtype wrappers for various domain concepts:
//! - Raw amounts and their decimal scaling
//! - Block ranges, batch chunks and fetch windows
//! - The canonical transaction and its category

pub mod amount;
pub mod block_range;
pub mod transaction;

// Note: Public types are re-exported from lib.rs, not here
