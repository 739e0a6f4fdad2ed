// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network-configuration document and its startup resolution.

pub mod config;
pub mod source;

pub use config::{
    service_account_name, ConfigAccount, ConfigContract, ConfigKey, NetworkConfig,
    NetworkConfigError,
};
pub use source::{NetworkConfigSource, DEFAULT_NETWORK_CONFIG};
