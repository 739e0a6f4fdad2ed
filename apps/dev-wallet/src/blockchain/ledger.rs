// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test-network ledger used by the full harness.
//!
//! The harness never executes transactions itself: it builds and signs an
//! account-creation transaction and hands it to a [`Ledger`]. [`DevLedger`]
//! is the in-process development network: it verifies the payer's envelope
//! signature, assigns a fresh address and keeps the resulting accounts for
//! lookup.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::keys::{verify_signature, KeyError};
use super::types::{OnChainAccount, SignedTransaction, FULL_KEY_WEIGHT};
use crate::models::Address;

/// Chain seed mixed into generated addresses.
const DEV_CHAIN_SEED: &[u8] = b"dev-wallet/emulator";

/// A test network able to look up and create accounts.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Look up an account. `Ok(None)` means the address does not exist.
    async fn get_account(&self, address: &Address) -> Result<Option<OnChainAccount>, LedgerError>;

    /// Submit a signed account-creation transaction and return the address
    /// assigned to the new account.
    async fn create_account(&self, transaction: SignedTransaction) -> Result<Address, LedgerError>;
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Address, OnChainAccount>,
    sequence: u64,
}

/// In-process development ledger.
pub struct DevLedger {
    state: Mutex<LedgerState>,
}

impl DevLedger {
    /// Create a ledger whose genesis contains the given accounts.
    pub fn with_genesis(accounts: impl IntoIterator<Item = OnChainAccount>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.address, account))
            .collect();
        Self {
            state: Mutex::new(LedgerState {
                accounts,
                sequence: 0,
            }),
        }
    }

    fn apply(&self, signed: SignedTransaction) -> Result<Address, LedgerError> {
        let tx = &signed.transaction;
        let payload = tx
            .signing_payload()
            .map_err(|e| LedgerError::Internal(e.to_string()))?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| LedgerError::Internal("ledger state poisoned".to_string()))?;

        let payer = state
            .accounts
            .get(&tx.payer)
            .ok_or(LedgerError::PayerNotFound(tx.payer))?;
        let payer_key = payer
            .keys
            .iter()
            .find(|key| key.index == tx.payer_key_index && !key.revoked)
            .ok_or(LedgerError::PayerKeyNotFound {
                payer: tx.payer,
                index: tx.payer_key_index,
            })?;

        if payer_key.weight < FULL_KEY_WEIGHT {
            return Err(LedgerError::InsufficientWeight(payer_key.weight));
        }
        verify_signature(payer_key, &payload, &signed.signature)?;

        if tx.keys.is_empty() {
            return Err(LedgerError::Rejected("account must carry at least one key".into()));
        }
        if let Some(key) = tx.keys.iter().find(|key| key.weight > FULL_KEY_WEIGHT) {
            return Err(LedgerError::Rejected(format!(
                "key weight {} exceeds {FULL_KEY_WEIGHT}",
                key.weight
            )));
        }

        let address = loop {
            state.sequence += 1;
            let candidate = derive_address(state.sequence);
            if !state.accounts.contains_key(&candidate) {
                break candidate;
            }
        };

        state.accounts.insert(
            address,
            OnChainAccount {
                address,
                balance: 0,
                keys: tx.keys.clone(),
            },
        );

        Ok(address)
    }
}

#[async_trait]
impl Ledger for DevLedger {
    async fn get_account(&self, address: &Address) -> Result<Option<OnChainAccount>, LedgerError> {
        let state = self
            .state
            .lock()
            .map_err(|_| LedgerError::Internal("ledger state poisoned".to_string()))?;
        Ok(state.accounts.get(address).cloned())
    }

    async fn create_account(&self, transaction: SignedTransaction) -> Result<Address, LedgerError> {
        let address = self.apply(transaction)?;
        tracing::debug!(%address, "Dev ledger created account");
        Ok(address)
    }
}

fn derive_address(sequence: u64) -> Address {
    let digest = Sha256::new()
        .chain_update(DEV_CHAIN_SEED)
        .chain_update(sequence.to_be_bytes())
        .finalize();
    let mut bytes = [0u8; Address::LENGTH];
    bytes.copy_from_slice(&digest[..Address::LENGTH]);
    Address::from_bytes(bytes)
}

/// Errors returned by a [`Ledger`].
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Payer account {0} does not exist")]
    PayerNotFound(Address),

    #[error("Payer {payer} has no active key at index {index}")]
    PayerKeyNotFound { payer: Address, index: u32 },

    #[error("Payer key weight {0} is below the signing threshold")]
    InsufficientWeight(u32),

    #[error("Envelope signature rejected: {0}")]
    Signature(#[from] KeyError),

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    #[error("Ledger error: {0}")]
    Internal(String),
}
