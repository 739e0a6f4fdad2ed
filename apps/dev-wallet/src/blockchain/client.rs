// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only REST client for a remote access node.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::types::{AccountKey, HashAlgorithm, OnChainAccount, SignatureAlgorithm};
use crate::models::Address;

/// Access-node REST client.
#[derive(Debug, Clone)]
pub struct AccessNodeClient {
    /// Base endpoint, without trailing slash.
    endpoint: String,
    http: reqwest::Client,
}

impl AccessNodeClient {
    /// Create a client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AccessNodeError> {
        let url: url::Url = endpoint
            .parse()
            .map_err(|e: url::ParseError| AccessNodeError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AccessNodeError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AccessNodeError::Unreachable(e.to_string()))?;

        Ok(Self {
            endpoint: url.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch an account together with its keys.
    pub async fn get_account(&self, address: &Address) -> Result<OnChainAccount, AccessNodeError> {
        let url = format!("{}/v1/accounts/{}", self.endpoint, address.to_hex());

        let response = self
            .http
            .get(&url)
            .query(&[("expand", "keys")])
            .send()
            .await
            .map_err(AccessNodeError::from_transport)?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(AccessNodeError::NotFound(*address)),
            status => return Err(AccessNodeError::Status(status.as_u16())),
        }

        let body: RestAccount = response
            .json()
            .await
            .map_err(|e| AccessNodeError::Decode(e.to_string()))?;
        body.into_account()
    }
}

#[derive(Debug, Deserialize)]
struct RestAccount {
    address: String,
    #[serde(default)]
    balance: String,
    #[serde(default)]
    keys: Vec<RestAccountKey>,
}

#[derive(Debug, Deserialize)]
struct RestAccountKey {
    index: String,
    public_key: String,
    signing_algorithm: String,
    hashing_algorithm: String,
    weight: String,
    #[serde(default)]
    revoked: bool,
}

impl RestAccount {
    fn into_account(self) -> Result<OnChainAccount, AccessNodeError> {
        let address = self
            .address
            .parse::<Address>()
            .map_err(|e| AccessNodeError::Decode(format!("address: {e}")))?;
        let balance = if self.balance.is_empty() {
            0
        } else {
            parse_number(&self.balance, "balance")?
        };

        let keys = self
            .keys
            .into_iter()
            .map(|key| {
                Ok(AccountKey {
                    index: parse_number(&key.index, "key index")?,
                    public_key: key.public_key.trim_start_matches("0x").to_string(),
                    signature_algorithm: SignatureAlgorithm::from_name(&key.signing_algorithm),
                    hash_algorithm: HashAlgorithm::from_name(&key.hashing_algorithm),
                    weight: parse_number(&key.weight, "key weight")?,
                    revoked: key.revoked,
                })
            })
            .collect::<Result<Vec<_>, AccessNodeError>>()?;

        Ok(OnChainAccount {
            address,
            balance,
            keys,
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, AccessNodeError> {
    raw.parse()
        .map_err(|_| AccessNodeError::Decode(format!("{field}: `{raw}` is not a number")))
}

/// Errors returned by [`AccessNodeClient`].
#[derive(Debug, thiserror::Error)]
pub enum AccessNodeError {
    #[error("Invalid access node URL: {0}")]
    InvalidUrl(String),

    #[error("Account {0} not found")]
    NotFound(Address),

    #[error("Access node timed out")]
    Timeout,

    #[error("Access node unreachable: {0}")]
    Unreachable(String),

    #[error("Access node returned status {0}")]
    Status(u16),

    #[error("Malformed access node response: {0}")]
    Decode(String),
}

impl AccessNodeError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}
