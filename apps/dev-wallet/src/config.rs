// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup into [`Settings`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8701` |
//! | `DEV_WALLET_BACKEND` | `harness`, `access-node` or `static` | `harness` |
//! | `FLOW_NETWORK` | Network name in the network-config document | `emulator` |
//! | `FLOW_CONFIG_PATH` | Network-config document on disk | `flow.json` |
//! | `FLOW_ACCESS_NODE` | Access node REST endpoint | `http://localhost:8888` |
//! | `FLOW_INIT_ACCOUNTS` | Accounts the harness creates at startup | `0` |
//! | `DEV_WALLET_BUNDLE` | Zip bundle replacing the embedded front-end | embedded |
//! | `UPSTREAM_TIMEOUT_SECS` | Bound on ledger and access node calls | `5` |
//! | `SHUTDOWN_GRACE_SECS` | Graceful shutdown grace period | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::bridge::BackendKind;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const BACKEND_ENV: &str = "DEV_WALLET_BACKEND";
pub const NETWORK_ENV: &str = "FLOW_NETWORK";
pub const NETWORK_CONFIG_PATH_ENV: &str = "FLOW_CONFIG_PATH";
pub const ACCESS_NODE_ENV: &str = "FLOW_ACCESS_NODE";
pub const INIT_ACCOUNTS_ENV: &str = "FLOW_INIT_ACCOUNTS";

/// Path to a zip bundle that replaces the embedded front-end.
///
/// # Default
/// Unset: the bundle compiled into the binary is served.
pub const BUNDLE_ENV: &str = "DEV_WALLET_BUNDLE";

pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const SHUTDOWN_GRACE_ENV: &str = "SHUTDOWN_GRACE_SECS";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8701;
pub const DEFAULT_NETWORK: &str = "emulator";
pub const DEFAULT_NETWORK_CONFIG_PATH: &str = "flow.json";
pub const DEFAULT_ACCESS_NODE: &str = "http://localhost:8888";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: BackendKind,
    pub network: String,
    pub network_config_path: PathBuf,
    pub access_node: String,
    pub init_accounts: usize,
    pub bundle_path: Option<PathBuf>,
    pub upstream_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend: BackendKind::Harness,
            network: DEFAULT_NETWORK.to_string(),
            network_config_path: PathBuf::from(DEFAULT_NETWORK_CONFIG_PATH),
            access_node: DEFAULT_ACCESS_NODE.to_string(),
            init_accounts: 0,
            bundle_path: None,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Unset and empty
    /// variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let backend = match var(BACKEND_ENV) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: BACKEND_ENV,
                reason,
            })?,
            None => defaults.backend,
        };

        Ok(Self {
            host: var(HOST_ENV).unwrap_or(defaults.host),
            port: parse_or(var(PORT_ENV), PORT_ENV, defaults.port)?,
            backend,
            network: var(NETWORK_ENV).unwrap_or(defaults.network),
            network_config_path: var(NETWORK_CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.network_config_path),
            access_node: var(ACCESS_NODE_ENV).unwrap_or(defaults.access_node),
            init_accounts: parse_or(var(INIT_ACCOUNTS_ENV), INIT_ACCOUNTS_ENV, 0)?,
            bundle_path: var(BUNDLE_ENV).map(PathBuf::from),
            upstream_timeout: Duration::from_secs(parse_or(
                var(UPSTREAM_TIMEOUT_ENV),
                UPSTREAM_TIMEOUT_ENV,
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
            shutdown_grace: Duration::from_secs(parse_or(
                var(SHUTDOWN_GRACE_ENV),
                SHUTDOWN_GRACE_ENV,
                DEFAULT_SHUTDOWN_GRACE_SECS,
            )?),
        })
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("`{raw}`: {e}"),
        }),
        None => Ok(default),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
