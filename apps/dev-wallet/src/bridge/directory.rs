// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local account-name directory.
//!
//! Keeps accounts in insertion order behind a single-writer/multi-reader
//! lock. Every operation takes the lock once, so concurrent creates and
//! renames never lose updates.

use tokio::sync::RwLock;

use crate::models::{Account, Address};

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: RwLock<Vec<Account>>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub async fn list(&self) -> Vec<Account> {
        self.accounts.read().await.clone()
    }

    pub async fn get(&self, address: &Address) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|account| &account.address == address)
            .cloned()
    }

    pub async fn contains(&self, address: &Address) -> bool {
        self.get(address).await.is_some()
    }

    /// Insert an account, replacing the label of an existing entry with the
    /// same address in place.
    pub async fn upsert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        match accounts.iter_mut().find(|a| a.address == account.address) {
            Some(existing) => *existing = account,
            None => accounts.push(account),
        }
    }

    /// Set a new label. Returns `false` when the address is unknown.
    pub async fn rename(&self, address: &Address, label: &str) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.iter_mut().find(|a| &a.address == address) {
            Some(account) => {
                account.display_name = label.to_string();
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, address: &Address) -> Option<Account> {
        let mut accounts = self.accounts.write().await;
        let position = accounts.iter().position(|a| &a.address == address)?;
        Some(accounts.remove(position))
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}
