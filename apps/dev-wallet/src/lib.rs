// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Dev Wallet - Local Development Wallet Backend
//!
//! Serves a packaged single-page wallet front-end and an FCL-style account
//! directory API against a test blockchain network.
//!
//! ## Modules
//!
//! - `api` - HTTP route dispatcher (Axum)
//! - `assets` - In-memory front-end bundle and SPA path resolution
//! - `bridge` - Account directory over harness, access-node or static backends
//! - `blockchain` - Keys, development ledger and access node client
//! - `network` - Network-configuration document
//! - `server` - Listener lifecycle and startup wiring

pub mod api;
pub mod assets;
pub mod blockchain;
pub mod bridge;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod server;
pub mod state;
pub mod telemetry;
