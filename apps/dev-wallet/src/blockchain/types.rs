// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! On-chain types shared by the development ledger and the access-node client.

use serde::{Deserialize, Serialize};

use crate::models::Address;

/// Key weight that alone satisfies an account's signing threshold.
pub const FULL_KEY_WEIGHT: u32 = 1000;

/// Signature algorithm attached to an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    #[serde(rename = "ECDSA_P256")]
    EcdsaP256,
    #[serde(rename = "ECDSA_secp256k1")]
    EcdsaSecp256k1,
    #[serde(other)]
    Unknown,
}

impl SignatureAlgorithm {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ECDSA_P256" => Self::EcdsaP256,
            "ECDSA_secp256k1" => Self::EcdsaSecp256k1,
            _ => Self::Unknown,
        }
    }
}

/// Hash algorithm attached to an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA2_256")]
    Sha2_256,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    #[serde(other)]
    Unknown,
}

impl HashAlgorithm {
    pub fn from_name(name: &str) -> Self {
        match name {
            "SHA2_256" => Self::Sha2_256,
            "SHA3_256" => Self::Sha3_256,
            _ => Self::Unknown,
        }
    }
}

/// Algorithms assumed for keys that declare none. Accounts created by the
/// harness use them too.
pub const DEFAULT_SIGNATURE_ALGORITHM: SignatureAlgorithm = SignatureAlgorithm::EcdsaP256;
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha3_256;

/// A public key registered on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    pub index: u32,
    /// Raw 64-byte public key, lowercase hex.
    pub public_key: String,
    pub signature_algorithm: SignatureAlgorithm,
    pub hash_algorithm: HashAlgorithm,
    pub weight: u32,
    pub revoked: bool,
}

/// An account as it exists on the test network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainAccount {
    pub address: Address,
    pub balance: u64,
    pub keys: Vec<AccountKey>,
}

impl OnChainAccount {
    /// Index of the first key that is neither revoked nor weightless.
    pub fn active_key_index(&self) -> Option<u32> {
        self.keys
            .iter()
            .find(|key| !key.revoked && key.weight > 0)
            .map(|key| key.index)
    }
}

/// Account-creation transaction authorised by a payer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountTransaction {
    pub payer: Address,
    /// Payer key that signs the envelope.
    pub payer_key_index: u32,
    /// Keys installed on the new account.
    pub keys: Vec<AccountKey>,
}

impl CreateAccountTransaction {
    /// Canonical bytes covered by the payer signature.
    pub fn signing_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A [`CreateAccountTransaction`] with the payer's envelope signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: CreateAccountTransaction,
    /// 64-byte `r || s` signature, lowercase hex.
    pub signature: String,
}
