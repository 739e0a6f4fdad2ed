// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key material for development accounts.
//!
//! A key pair is bound to the signature and hash algorithms the account key
//! declares. ECDSA over P-256 and secp256k1 is supported, with SHA2-256 or
//! SHA3-256 message hashing. Public keys use the raw 64-byte encoding
//! (uncompressed SEC1 point without the `0x04` tag) that the test network
//! stores on accounts.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use super::types::{AccountKey, HashAlgorithm, SignatureAlgorithm};

/// Length of the seed read from the OS random source.
const SEED_LENGTH: usize = 32;

#[derive(Clone)]
enum SigningKey {
    P256(p256::ecdsa::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
}

/// An ECDSA key pair together with the hash it signs with.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    hash_algorithm: HashAlgorithm,
}

impl KeyPair {
    /// Generate a fresh key pair from an OS-provided random seed.
    pub fn generate(
        signature_algorithm: SignatureAlgorithm,
        hash_algorithm: HashAlgorithm,
    ) -> Result<Self, KeyError> {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| KeyError::Entropy(e.to_string()))?;
        Self::from_seed(&seed, signature_algorithm, hash_algorithm)
    }

    fn from_seed(
        seed: &[u8],
        signature_algorithm: SignatureAlgorithm,
        hash_algorithm: HashAlgorithm,
    ) -> Result<Self, KeyError> {
        if hash_algorithm == HashAlgorithm::Unknown {
            return Err(KeyError::UnsupportedAlgorithm("hash"));
        }
        let signing_key = match signature_algorithm {
            SignatureAlgorithm::EcdsaP256 => SigningKey::P256(
                p256::ecdsa::SigningKey::from_slice(seed).map_err(invalid_private_key)?,
            ),
            SignatureAlgorithm::EcdsaSecp256k1 => SigningKey::Secp256k1(
                k256::ecdsa::SigningKey::from_slice(seed).map_err(invalid_private_key)?,
            ),
            SignatureAlgorithm::Unknown => {
                return Err(KeyError::UnsupportedAlgorithm("signature"));
            }
        };
        Ok(Self {
            signing_key,
            hash_algorithm,
        })
    }

    /// Load a key pair from a hex private key (optional `0x` prefix).
    pub fn from_private_key_hex(
        private_key_hex: &str,
        signature_algorithm: SignatureAlgorithm,
        hash_algorithm: HashAlgorithm,
    ) -> Result<Self, KeyError> {
        let raw = private_key_hex.trim().trim_start_matches("0x");
        let bytes =
            hex::decode(raw).map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        Self::from_seed(&bytes, signature_algorithm, hash_algorithm)
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        match self.signing_key {
            SigningKey::P256(_) => SignatureAlgorithm::EcdsaP256,
            SigningKey::Secp256k1(_) => SignatureAlgorithm::EcdsaSecp256k1,
        }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn private_key_hex(&self) -> String {
        match &self.signing_key {
            SigningKey::P256(key) => hex::encode(key.to_bytes()),
            SigningKey::Secp256k1(key) => hex::encode(key.to_bytes()),
        }
    }

    pub fn public_key_hex(&self) -> String {
        let point = match &self.signing_key {
            SigningKey::P256(key) => key.verifying_key().to_encoded_point(false).as_bytes().to_vec(),
            SigningKey::Secp256k1(key) => {
                key.verifying_key().to_encoded_point(false).as_bytes().to_vec()
            }
        };
        hex::encode(&point[1..])
    }

    /// Hash `message` with the key's hash algorithm, sign it and return the
    /// 64-byte `r || s` signature as hex.
    pub fn sign(&self, message: &[u8]) -> Result<String, KeyError> {
        let prehash = digest(self.hash_algorithm, message)?;
        let bytes = match &self.signing_key {
            SigningKey::P256(key) => {
                let signature: p256::ecdsa::Signature = key
                    .sign_prehash(&prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                signature.to_bytes().to_vec()
            }
            SigningKey::Secp256k1(key) => {
                let signature: k256::ecdsa::Signature = key
                    .sign_prehash(&prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                signature.to_bytes().to_vec()
            }
        };
        Ok(hex::encode(bytes))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("signature_algorithm", &self.signature_algorithm())
            .field("hash_algorithm", &self.hash_algorithm)
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

fn invalid_private_key(err: impl std::fmt::Display) -> KeyError {
    KeyError::InvalidPrivateKey(err.to_string())
}

fn digest(hash_algorithm: HashAlgorithm, message: &[u8]) -> Result<Vec<u8>, KeyError> {
    match hash_algorithm {
        HashAlgorithm::Sha2_256 => Ok(Sha256::digest(message).to_vec()),
        HashAlgorithm::Sha3_256 => Ok(Sha3_256::digest(message).to_vec()),
        HashAlgorithm::Unknown => Err(KeyError::UnsupportedAlgorithm("hash")),
    }
}

/// Verify a hex signature produced by [`KeyPair::sign`] against an account
/// key, using the algorithms the key declares.
pub fn verify_signature(
    key: &AccountKey,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), KeyError> {
    let raw = hex::decode(key.public_key.trim_start_matches("0x"))
        .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
    let mut sec1 = Vec::with_capacity(raw.len() + 1);
    sec1.push(0x04);
    sec1.extend_from_slice(&raw);

    let signature_bytes = hex::decode(signature_hex).map_err(|_| KeyError::InvalidSignature)?;
    let prehash = digest(key.hash_algorithm, message)?;

    match key.signature_algorithm {
        SignatureAlgorithm::EcdsaP256 => {
            let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
            let signature = p256::ecdsa::Signature::from_slice(&signature_bytes)
                .map_err(|_| KeyError::InvalidSignature)?;
            verifying_key
                .verify_prehash(&prehash, &signature)
                .map_err(|_| KeyError::InvalidSignature)
        }
        SignatureAlgorithm::EcdsaSecp256k1 => {
            let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
            let signature = k256::ecdsa::Signature::from_slice(&signature_bytes)
                .map_err(|_| KeyError::InvalidSignature)?;
            verifying_key
                .verify_prehash(&prehash, &signature)
                .map_err(|_| KeyError::InvalidSignature)
        }
        SignatureAlgorithm::Unknown => Err(KeyError::UnsupportedAlgorithm("signature")),
    }
}

/// Errors raised while handling key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Random source unavailable: {0}")]
    Entropy(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Unsupported {0} algorithm")]
    UnsupportedAlgorithm(&'static str),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Signature does not verify")]
    InvalidSignature,
}
