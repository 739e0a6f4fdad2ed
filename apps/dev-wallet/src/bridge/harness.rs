// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Full harness backend.
//!
//! Creates accounts by signing an account-creation transaction with the
//! service account's key and submitting it to a [`Ledger`]. Labels live in a
//! local [`AccountDirectory`]; deleting an account only forgets it there.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{validate_label, AccountBridge, AccountDirectory, BackendKind, BridgeError};
use crate::blockchain::{
    AccountKey, CreateAccountTransaction, DevLedger, KeyPair, Ledger, OnChainAccount,
    SignedTransaction, DEFAULT_HASH_ALGORITHM, DEFAULT_SIGNATURE_ALGORITHM, FULL_KEY_WEIGHT,
};
use crate::models::{Account, AccountDirectoryEntry, Address, SERVICE_ACCOUNT_LABEL};
use crate::network::{service_account_name, NetworkConfig};

/// The account whose key authorises new accounts.
#[derive(Debug, Clone)]
pub struct ServiceSigner {
    pub address: Address,
    pub key_index: u32,
    pub keys: KeyPair,
}

pub struct FullHarness {
    ledger: Arc<dyn Ledger>,
    service: ServiceSigner,
    directory: AccountDirectory,
    upstream_timeout: Duration,
}

impl FullHarness {
    pub fn new(ledger: Arc<dyn Ledger>, service: ServiceSigner, upstream_timeout: Duration) -> Self {
        Self {
            ledger,
            service,
            directory: AccountDirectory::new(),
            upstream_timeout,
        }
    }

    /// Boot a development ledger from the network config, register the
    /// configured accounts and pre-provision `init_accounts` more.
    pub async fn start(
        network: &NetworkConfig,
        network_name: &str,
        init_accounts: usize,
        upstream_timeout: Duration,
    ) -> Result<Self, BridgeError> {
        let service_name = service_account_name(network_name);
        let service_account = network
            .service_account(network_name)
            .map_err(|e| BridgeError::InvalidInput(e.to_string()))?;
        let service = ServiceSigner {
            address: service_account.address,
            key_index: service_account.key.index,
            keys: service_account.key.key_pair()?,
        };

        let mut genesis = Vec::with_capacity(network.accounts.len());
        for account in &network.accounts {
            match account.key.key_pair() {
                Ok(keys) => genesis.push(OnChainAccount {
                    address: account.address,
                    balance: 0,
                    keys: vec![full_weight_key(account.key.index, &keys)],
                }),
                Err(e) => warn!(
                    account = %account.name,
                    error = %e,
                    "Skipping genesis account with unusable key"
                ),
            }
        }

        let harness = Self::new(
            Arc::new(DevLedger::with_genesis(genesis)),
            service,
            upstream_timeout,
        );

        for account in &network.accounts {
            let label = if account.name == service_name {
                SERVICE_ACCOUNT_LABEL
            } else {
                account.name.as_str()
            };
            let mut entry = Account::new(account.address, label);
            entry.key_index = account.key.index;
            harness.directory.upsert(entry).await;
        }

        for i in 0..init_accounts {
            harness.create_account(&generated_label(i)).await?;
        }

        info!(
            service = %harness.service.address,
            accounts = harness.directory.len().await,
            "Harness initialized"
        );
        Ok(harness)
    }

    pub fn service_address(&self) -> Address {
        self.service.address
    }

    fn sign(&self, transaction: CreateAccountTransaction) -> Result<SignedTransaction, BridgeError> {
        let payload = transaction
            .signing_payload()
            .map_err(|e| BridgeError::Internal(e.to_string()))?;
        let signature = self.service.keys.sign(&payload)?;
        Ok(SignedTransaction {
            transaction,
            signature,
        })
    }
}

fn full_weight_key(index: u32, keys: &KeyPair) -> AccountKey {
    AccountKey {
        index,
        public_key: keys.public_key_hex(),
        signature_algorithm: keys.signature_algorithm(),
        hash_algorithm: keys.hash_algorithm(),
        weight: FULL_KEY_WEIGHT,
        revoked: false,
    }
}

/// `Account A` … `Account Z`, then `Account 27`, `Account 28`, …
pub fn generated_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Account {}", char::from(b'A' + i)),
        _ => format!("Account {}", index + 1),
    }
}

#[async_trait]
impl AccountBridge for FullHarness {
    fn kind(&self) -> BackendKind {
        BackendKind::Harness
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
        self.directory
            .get(address)
            .await
            .map(AccountDirectoryEntry::from)
            .ok_or(BridgeError::NotFound(*address))
    }

    async fn create_account(&self, label: &str) -> Result<AccountDirectoryEntry, BridgeError> {
        let label = validate_label(label)?;
        let keys = KeyPair::generate(DEFAULT_SIGNATURE_ALGORITHM, DEFAULT_HASH_ALGORITHM)?;

        let signed = self.sign(CreateAccountTransaction {
            payer: self.service.address,
            payer_key_index: self.service.key_index,
            keys: vec![full_weight_key(0, &keys)],
        })?;

        let address = tokio::time::timeout(self.upstream_timeout, self.ledger.create_account(signed))
            .await
            .map_err(|_| BridgeError::timeout("account creation timed out"))??;

        let account = Account::new(address, label);
        self.directory.upsert(account.clone()).await;
        info!(%address, label = %account.display_name, "Account created");

        Ok(AccountDirectoryEntry::from(account))
    }

    async fn rename_account(&self, address: &Address, label: &str) -> Result<(), BridgeError> {
        let label = validate_label(label)?;
        if self.directory.rename(address, &label).await {
            Ok(())
        } else {
            Err(BridgeError::NotFound(*address))
        }
    }

    async fn delete_account(&self, address: &Address) -> Result<(), BridgeError> {
        let removed = self
            .directory
            .remove(address)
            .await
            .ok_or(BridgeError::NotFound(*address))?;
        info!(%address, label = %removed.display_name, "Account removed from directory");
        Ok(())
    }
}
