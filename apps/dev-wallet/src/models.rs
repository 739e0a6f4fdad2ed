// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Account-directory types shared by the bridge backends and the HTTP layer.
//!
//! - [`Address`]: 8-byte account address on the test network
//! - [`Account`]: an account as a bridge backend knows it
//! - [`AccountDirectoryEntry`]: the FCL wire projection of an [`Account`]
//! - [`ServiceConfig`]: the read-only configuration served to the front-end

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Entity tag carried by every directory entry.
pub const ACCOUNT_ENTRY_TYPE: &str = "ACCOUNT";

/// Label given to the service account in the local directory.
pub const SERVICE_ACCOUNT_LABEL: &str = "Service Account";

// =============================================================================
// Address Type
// =============================================================================

/// Account address on the test network.
///
/// Parsed from 1 to 16 hex digits with an optional `0x` prefix; shorter inputs
/// are left-padded with zeros. Always rendered as `0x` + 16 lowercase digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 8]);

impl Address {
    pub const LENGTH: usize = 8;

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Hex form without the `0x` prefix, as used in network-config documents.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Reasons an address string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address is longer than 16 hex digits")]
    TooLong,

    #[error("address contains non-hex characters")]
    NotHex,
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() {
            return Err(AddressError::Empty);
        }
        if digits.len() > Self::LENGTH * 2 {
            return Err(AddressError::TooLong);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::NotHex);
        }

        let padded = format!("{digits:0>16}");
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|_| AddressError::NotHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Account Models
// =============================================================================

/// An account known to a bridge backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Network-unique address; never changes once assigned.
    pub address: Address,
    /// Human label, mutable through rename.
    pub display_name: String,
    /// Index of the active key slot.
    pub key_index: u32,
    /// Capability strings granted to the account, if any.
    pub scopes: Option<Vec<String>>,
}

impl Account {
    pub fn new(address: Address, display_name: impl Into<String>) -> Self {
        Self {
            address,
            display_name: display_name.into(),
            key_index: 0,
            scopes: Some(Vec::new()),
        }
    }
}

/// FCL account-discovery entry returned to the front-end.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDirectoryEntry {
    /// Always `ACCOUNT`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Account address (`0x` + 16 hex digits).
    #[schema(value_type = String, example = "0xf8d6e0586b0a20c7")]
    pub address: Address,
    /// Active key index.
    pub key_id: u32,
    /// Human label.
    pub label: String,
    /// Capability scopes.
    pub scopes: Option<Vec<String>>,
}

impl From<&Account> for AccountDirectoryEntry {
    fn from(account: &Account) -> Self {
        Self {
            entry_type: ACCOUNT_ENTRY_TYPE.to_string(),
            address: account.address,
            key_id: account.key_index,
            label: account.display_name.clone(),
            scopes: account.scopes.clone(),
        }
    }
}

impl From<Account> for AccountDirectoryEntry {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

// =============================================================================
// Service Configuration
// =============================================================================

/// Read-only configuration served to the wallet front-end.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Service account address.
    pub flow_account_address: String,
    /// Service account private key (hex). Development keys only.
    pub flow_account_private_key: String,
    /// Service account public key (raw 64-byte hex).
    pub flow_account_public_key: String,
    /// Service account key index.
    pub flow_account_key_id: String,
    /// Access node REST endpoint.
    pub flow_access_node: String,
    /// Contract name to deployed address on the selected network.
    pub contracts: BTreeMap<String, String>,
}
