// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Explorer API access: raw record shapes, request construction and the
//! paginated category client.

pub mod client;
pub mod records;
pub mod request;

pub use client::ExplorerClient;
pub use records::{
    CategoryRecord, Erc20Transfer, Erc721Transfer, InternalTransaction, NormalTransaction,
    ResponseEnvelope,
};
pub use request::{Action, ExplorerRequest};
