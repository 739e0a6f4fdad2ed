// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only backend over a remote access node.
//!
//! Lookups go to the access node; labels come from a local directory seeded
//! from the network config. Accounts cannot be created or deleted.

use async_trait::async_trait;

use super::{validate_label, AccountBridge, AccountDirectory, BackendKind, BridgeError};
use crate::blockchain::AccessNodeClient;
use crate::models::{Account, AccountDirectoryEntry, Address, SERVICE_ACCOUNT_LABEL};
use crate::network::{service_account_name, NetworkConfig};

pub struct ReadOnlyClient {
    client: AccessNodeClient,
    directory: AccountDirectory,
}

impl ReadOnlyClient {
    /// Build the client and seed its label directory from `network`.
    pub fn new(client: AccessNodeClient, network: &NetworkConfig, network_name: &str) -> Self {
        let service_name = service_account_name(network_name);
        let accounts = network
            .accounts
            .iter()
            .map(|account| {
                let label = if account.name == service_name {
                    SERVICE_ACCOUNT_LABEL
                } else {
                    account.name.as_str()
                };
                let mut entry = Account::new(account.address, label);
                entry.key_index = account.key.index;
                entry
            })
            .collect();

        Self {
            client,
            directory: AccountDirectory::with_accounts(accounts),
        }
    }
}

#[async_trait]
impl AccountBridge for ReadOnlyClient {
    fn kind(&self) -> BackendKind {
        BackendKind::AccessNode
    }

    async fn list_accounts(&self) -> Vec<AccountDirectoryEntry> {
        self.directory
            .list()
            .await
            .into_iter()
            .map(AccountDirectoryEntry::from)
            .collect()
    }

    async fn get_account(&self, address: &Address) -> Result<AccountDirectoryEntry, BridgeError> {
        let on_chain = self.client.get_account(address).await?;
        let label = self
            .directory
            .get(address)
            .await
            .map(|account| account.display_name)
            .unwrap_or_else(|| address.to_string());

        let mut account = Account::new(on_chain.address, label);
        account.key_index = on_chain.active_key_index().unwrap_or_default();
        Ok(AccountDirectoryEntry::from(account))
    }

    async fn create_account(&self, _label: &str) -> Result<AccountDirectoryEntry, BridgeError> {
        Err(BridgeError::Unsupported("create_account"))
    }

    async fn rename_account(&self, address: &Address, label: &str) -> Result<(), BridgeError> {
        let label = validate_label(label)?;
        if self.directory.rename(address, &label).await {
            return Ok(());
        }

        // Unlabelled but live accounts join the directory on first rename.
        let on_chain = self.client.get_account(address).await?;
        let mut account = Account::new(on_chain.address, label);
        account.key_index = on_chain.active_key_index().unwrap_or_default();
        self.directory.upsert(account).await;
        Ok(())
    }

    async fn delete_account(&self, _address: &Address) -> Result<(), BridgeError> {
        Err(BridgeError::Unsupported("delete_account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    const KNOWN: &str = "f8d6e0586b0a20c7";
    const UNLABELLED: &str = "01cf0e2f2f715450";

    async fn fake_account(Path(address): Path<String>) -> Result<Json<Value>, StatusCode> {
        match address.as_str() {
            KNOWN | UNLABELLED => Ok(Json(json!({
                "address": address,
                "balance": "1000",
                "keys": [
                    {
                        "index": "0", "public_key": "0xaa",
                        "signing_algorithm": "ECDSA_P256", "hashing_algorithm": "SHA3_256",
                        "weight": "1000", "revoked": true
                    },
                    {
                        "index": "1", "public_key": "0xbb",
                        "signing_algorithm": "ECDSA_P256", "hashing_algorithm": "SHA3_256",
                        "weight": "1000", "revoked": false
                    }
                ]
            }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn spawn_access_node() -> String {
        let app = Router::new().route("/v1/accounts/{address}", get(fake_account));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn network() -> NetworkConfig {
        NetworkConfig::from_json(&format!(
            r#"{{ "accounts": {{ "emulator-account": {{ "address": "{KNOWN}", "key": "aa" }} }} }}"#
        ))
        .unwrap()
    }

    async fn bridge() -> ReadOnlyClient {
        let endpoint = spawn_access_node().await;
        let client = AccessNodeClient::new(&endpoint, Duration::from_secs(2)).unwrap();
        ReadOnlyClient::new(client, &network(), "emulator")
    }

    #[tokio::test]
    async fn list_comes_from_local_directory() {
        let bridge = bridge().await;
        let accounts = bridge.list_accounts().await;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].label, "Service Account");
    }

    #[tokio::test]
    async fn get_uses_remote_keys_and_local_label() {
        let bridge = bridge().await;
        let address: Address = KNOWN.parse().unwrap();

        let entry = bridge.get_account(&address).await.unwrap();
        assert_eq!(entry.label, "Service Account");
        assert_eq!(entry.key_id, 1);
    }

    #[tokio::test]
    async fn unknown_remote_account_is_not_found() {
        let bridge = bridge().await;
        let missing: Address = "0x0badc0ffee".parse().unwrap();
        assert!(matches!(
            bridge.get_account(&missing).await,
            Err(BridgeError::NotFound(a)) if a == missing
        ));
        assert!(matches!(
            bridge.rename_account(&missing, "x").await,
            Err(BridgeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rename_adds_live_account_to_directory() {
        let bridge = bridge().await;
        let address: Address = UNLABELLED.parse().unwrap();

        bridge.rename_account(&address, "Bob").await.unwrap();

        assert_eq!(bridge.get_account(&address).await.unwrap().label, "Bob");
        assert_eq!(bridge.list_accounts().await.len(), 2);
    }

    #[tokio::test]
    async fn mutations_are_unsupported() {
        let bridge = bridge().await;
        let address: Address = KNOWN.parse().unwrap();
        assert!(matches!(
            bridge.create_account("x").await,
            Err(BridgeError::Unsupported(_))
        ));
        assert!(matches!(
            bridge.delete_account(&address).await,
            Err(BridgeError::Unsupported(_))
        ));
        bridge.fund_account(&address, None).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_node_is_upstream_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = AccessNodeClient::new(&endpoint, Duration::from_secs(2)).unwrap();
        let bridge = ReadOnlyClient::new(client, &network(), "emulator");
        let address: Address = KNOWN.parse().unwrap();

        assert!(matches!(
            bridge.get_account(&address).await,
            Err(BridgeError::UpstreamUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn slow_node_times_out() {
        async fn stall() -> StatusCode {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }
        let app = Router::new().route("/v1/accounts/{address}", get(stall));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = AccessNodeClient::new(&endpoint, Duration::from_millis(100)).unwrap();
        let bridge = ReadOnlyClient::new(client, &network(), "emulator");
        let address: Address = KNOWN.parse().unwrap();

        assert!(matches!(
            bridge.get_account(&address).await,
            Err(BridgeError::UpstreamUnavailable { timed_out: true, .. })
        ));
    }
}
