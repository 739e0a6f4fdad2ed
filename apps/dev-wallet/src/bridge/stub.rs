// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static backend with no live network.

use async_trait::async_trait;

use super::{AccountBridge, BackendKind, BridgeError};
use crate::models::{AccountDirectoryEntry, Address};

/// Serves configuration only: the directory is always empty and every
/// mutation is unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStub;

#[async_trait]
impl AccountBridge for StaticStub {
    fn kind(&self) -> BackendKind {
        BackendKind::Static
    }

    async fn list_accounts(&self) -> Vec<AccountDirectoryEntry> {
        Vec::new()
    }

    async fn get_account(&self, address: &Address) -> Result<AccountDirectoryEntry, BridgeError> {
        Err(BridgeError::NotFound(*address))
    }

    async fn create_account(&self, _label: &str) -> Result<AccountDirectoryEntry, BridgeError> {
        Err(BridgeError::Unsupported("create_account"))
    }

    async fn rename_account(&self, _address: &Address, _label: &str) -> Result<(), BridgeError> {
        Err(BridgeError::Unsupported("rename_account"))
    }

    async fn delete_account(&self, _address: &Address) -> Result<(), BridgeError> {
        Err(BridgeError::Unsupported("delete_account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn everything_but_funding_is_refused() {
        let stub = StaticStub;
        let address: Address = "0xf8d6e0586b0a20c7".parse().unwrap();

        assert!(stub.list_accounts().await.is_empty());
        assert!(matches!(stub.get_account(&address).await, Err(BridgeError::NotFound(_))));
        assert!(matches!(stub.create_account("a").await, Err(BridgeError::Unsupported(_))));
        assert!(matches!(
            stub.rename_account(&address, "a").await,
            Err(BridgeError::Unsupported(_))
        ));
        assert!(matches!(
            stub.delete_account(&address).await,
            Err(BridgeError::Unsupported(_))
        ));
        assert!(stub.fund_account(&address, Some(5)).await.is_ok());
        assert!(stub.fund_auxiliary_token(&address).await.is_ok());
    }
}
