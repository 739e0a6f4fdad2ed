// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Account Bridge
//!
//! One account-directory contract over three interchangeable backends:
//!
//! | Backend | List | Get | Create | Rename | Delete |
//! |---------|------|-----|--------|--------|--------|
//! | [`FullHarness`] | local directory | local directory | ledger + directory | directory | directory |
//! | [`ReadOnlyClient`] | local directory | access node | unsupported | directory | unsupported |
//! | [`StaticStub`] | empty | not found | unsupported | unsupported | unsupported |
//!
//! Funding operations are accepted by every backend and never move funds.
//!
//! The backend is chosen once at startup from [`BackendKind`]; handlers only
//! ever see `Arc<dyn AccountBridge>`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::blockchain::{AccessNodeClient, AccessNodeError, KeyError, LedgerError};
use crate::models::{AccountDirectoryEntry, Address};
use crate::network::NetworkConfig;

pub mod access_node;
pub mod directory;
pub mod harness;
pub mod stub;

pub use access_node::ReadOnlyClient;
pub use directory::AccountDirectory;
pub use harness::FullHarness;
pub use stub::StaticStub;

/// Account-directory operations exposed to the front-end.
#[async_trait]
pub trait AccountBridge: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// All accounts the backend knows, in its own insertion order.
    async fn list_accounts(&self) -> Vec<AccountDirectoryEntry>;

    async fn get_account(&self, address: &Address) -> Result<AccountDirectoryEntry, BridgeError>;

    async fn create_account(&self, label: &str) -> Result<AccountDirectoryEntry, BridgeError>;

    /// Change the local label of an account. On-chain state is untouched.
    async fn rename_account(&self, address: &Address, label: &str) -> Result<(), BridgeError>;

    /// Forget an account locally. The account stays on-chain.
    async fn delete_account(&self, address: &Address) -> Result<(), BridgeError>;

    /// Accepted without transferring anything.
    async fn fund_account(&self, address: &Address, amount: Option<u64>) -> Result<(), BridgeError> {
        tracing::debug!(%address, ?amount, backend = %self.kind(), "Fund request ignored");
        Ok(())
    }

    /// Accepted without transferring anything.
    async fn fund_auxiliary_token(&self, address: &Address) -> Result<(), BridgeError> {
        tracing::debug!(%address, backend = %self.kind(), "Auxiliary token request ignored");
        Ok(())
    }
}

// =============================================================================
// Backend Selection
// =============================================================================

/// Which backend serves the account directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Harness,
    AccessNode,
    Static,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Harness => "harness",
            BackendKind::AccessNode => "access-node",
            BackendKind::Static => "static",
        })
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "harness" | "emulator" => Ok(BackendKind::Harness),
            "access-node" | "access_node" | "readonly" | "read-only" => {
                Ok(BackendKind::AccessNode)
            }
            "static" | "stub" => Ok(BackendKind::Static),
            other => Err(format!(
                "unknown backend `{other}` (expected harness, access-node or static)"
            )),
        }
    }
}

/// Inputs needed to start any backend.
#[derive(Debug, Clone)]
pub struct BackendOptions {
    pub network: NetworkConfig,
    pub network_name: String,
    pub access_node: String,
    pub init_accounts: usize,
    pub upstream_timeout: Duration,
}

/// Start the backend selected by `kind`.
pub async fn start_backend(
    kind: BackendKind,
    options: &BackendOptions,
) -> Result<Arc<dyn AccountBridge>, BridgeError> {
    let bridge: Arc<dyn AccountBridge> = match kind {
        BackendKind::Harness => Arc::new(
            FullHarness::start(
                &options.network,
                &options.network_name,
                options.init_accounts,
                options.upstream_timeout,
            )
            .await?,
        ),
        BackendKind::AccessNode => {
            let client = AccessNodeClient::new(&options.access_node, options.upstream_timeout)?;
            Arc::new(ReadOnlyClient::new(client, &options.network, &options.network_name))
        }
        BackendKind::Static => Arc::new(StaticStub),
    };

    tracing::info!(backend = %kind, "Account bridge started");
    Ok(bridge)
}

/// Trim a label and reject empty ones.
pub(crate) fn validate_label(label: &str) -> Result<String, BridgeError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(BridgeError::InvalidInput("label must not be empty".into()));
    }
    Ok(label.to_string())
}

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by [`AccountBridge`] operations.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Account {0} not found")]
    NotFound(Address),

    #[error("Operation `{0}` is not supported by this backend")]
    Unsupported(&'static str),

    #[error("Upstream unavailable: {reason}")]
    UpstreamUnavailable { reason: String, timed_out: bool },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    pub(crate) fn upstream(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
            timed_out: false,
        }
    }

    pub(crate) fn timeout(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
            timed_out: true,
        }
    }
}

impl From<AccessNodeError> for BridgeError {
    fn from(err: AccessNodeError) -> Self {
        match err {
            AccessNodeError::NotFound(address) => BridgeError::NotFound(address),
            AccessNodeError::Timeout => BridgeError::timeout(err.to_string()),
            AccessNodeError::Unreachable(_) | AccessNodeError::Status(_) => {
                BridgeError::upstream(err.to_string())
            }
            AccessNodeError::InvalidUrl(_) => BridgeError::InvalidInput(err.to_string()),
            AccessNodeError::Decode(_) => BridgeError::Internal(err.to_string()),
        }
    }
}

impl From<LedgerError> for BridgeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unavailable(_) => BridgeError::upstream(err.to_string()),
            _ => BridgeError::Internal(err.to_string()),
        }
    }
}

impl From<KeyError> for BridgeError {
    fn from(err: KeyError) -> Self {
        BridgeError::Internal(err.to_string())
    }
}
