// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test-network integration.
//!
//! This module provides:
//! - Key generation and envelope signing for new accounts
//! - The [`Ledger`] seam the full harness submits transactions to, with the
//!   in-process [`DevLedger`]
//! - A read-only REST client for remote access nodes

pub mod client;
pub mod keys;
pub mod ledger;
pub mod types;

pub use client::{AccessNodeClient, AccessNodeError};
pub use keys::{KeyError, KeyPair};
pub use ledger::{DevLedger, Ledger, LedgerError};
pub use types::*;
