// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network-configuration document (`flow.json` layout).
//!
//! Only the sections the wallet needs are read: `accounts` and `contracts`.
//! Account order follows the document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::blockchain::{
    HashAlgorithm, KeyError, KeyPair, SignatureAlgorithm, DEFAULT_HASH_ALGORITHM,
    DEFAULT_SIGNATURE_ALGORITHM,
};
use crate::models::{Address, ServiceConfig};

/// A named account from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigAccount {
    pub name: String,
    pub address: Address,
    pub key: ConfigKey,
}

/// Signing key of a [`ConfigAccount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    pub index: u32,
    pub private_key: String,
    pub signature_algorithm: SignatureAlgorithm,
    pub hash_algorithm: HashAlgorithm,
}

/// A contract and its deployed addresses per network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigContract {
    pub name: String,
    pub aliases: BTreeMap<String, String>,
}

/// Parsed network-configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    pub accounts: Vec<ConfigAccount>,
    pub contracts: Vec<ConfigContract>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    accounts: Map<String, Value>,
    #[serde(default)]
    contracts: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawAccount {
    address: String,
    key: RawKey,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Hex(String),
    Detailed {
        #[serde(default)]
        index: u32,
        #[serde(rename = "signatureAlgorithm", default)]
        signature_algorithm: Option<String>,
        #[serde(rename = "hashAlgorithm", default)]
        hash_algorithm: Option<String>,
        #[serde(rename = "privateKey")]
        private_key: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContract {
    Aliased {
        #[serde(default)]
        aliases: BTreeMap<String, String>,
    },
    Local(String),
}

impl TryFrom<RawKey> for ConfigKey {
    type Error = String;

    /// Keys that omit their algorithms default to P-256 with SHA3-256.
    /// Algorithms the wallet cannot sign with are rejected.
    fn try_from(raw: RawKey) -> Result<Self, Self::Error> {
        let (index, signature_algorithm, hash_algorithm, private_key) = match raw {
            RawKey::Hex(private_key) => (0, None, None, private_key),
            RawKey::Detailed {
                index,
                signature_algorithm,
                hash_algorithm,
                private_key,
            } => (index, signature_algorithm, hash_algorithm, private_key),
        };

        let signature_algorithm = match signature_algorithm {
            Some(name) => match SignatureAlgorithm::from_name(&name) {
                SignatureAlgorithm::Unknown => {
                    return Err(format!("unsupported signature algorithm `{name}`"))
                }
                known => known,
            },
            None => DEFAULT_SIGNATURE_ALGORITHM,
        };
        let hash_algorithm = match hash_algorithm {
            Some(name) => match HashAlgorithm::from_name(&name) {
                HashAlgorithm::Unknown => {
                    return Err(format!("unsupported hash algorithm `{name}`"))
                }
                known => known,
            },
            None => DEFAULT_HASH_ALGORITHM,
        };

        Ok(ConfigKey {
            index,
            private_key,
            signature_algorithm,
            hash_algorithm,
        })
    }
}

impl ConfigKey {
    /// Key pair for signing with this key's declared algorithms.
    pub fn key_pair(&self) -> Result<KeyPair, KeyError> {
        KeyPair::from_private_key_hex(
            &self.private_key,
            self.signature_algorithm,
            self.hash_algorithm,
        )
    }
}

impl NetworkConfig {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, NetworkConfigError> {
        let raw: RawDocument = serde_json::from_str(text)?;

        let accounts = raw
            .accounts
            .into_iter()
            .map(|(name, value)| {
                let account: RawAccount = serde_json::from_value(value)
                    .map_err(|e| NetworkConfigError::invalid("account", &name, e))?;
                let address = account
                    .address
                    .parse::<Address>()
                    .map_err(|e| NetworkConfigError::invalid("account", &name, e))?;
                let key = ConfigKey::try_from(account.key)
                    .map_err(|e| NetworkConfigError::invalid("account", &name, e))?;
                Ok(ConfigAccount { name, address, key })
            })
            .collect::<Result<Vec<_>, NetworkConfigError>>()?;

        let contracts = raw
            .contracts
            .into_iter()
            .map(|(name, value)| {
                let aliases = match serde_json::from_value::<RawContract>(value) {
                    Ok(RawContract::Aliased { aliases }) => aliases,
                    Ok(RawContract::Local(path)) => {
                        tracing::debug!(contract = %name, %path, "Contract has no aliases");
                        BTreeMap::new()
                    }
                    Err(e) => return Err(NetworkConfigError::invalid("contract", &name, e)),
                };
                Ok(ConfigContract { name, aliases })
            })
            .collect::<Result<Vec<_>, NetworkConfigError>>()?;

        Ok(Self {
            accounts,
            contracts,
        })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, NetworkConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| NetworkConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn account(&self, name: &str) -> Option<&ConfigAccount> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// The account that signs on behalf of the wallet on `network`.
    pub fn service_account(&self, network: &str) -> Result<&ConfigAccount, NetworkConfigError> {
        let name = service_account_name(network);
        self.account(&name)
            .ok_or(NetworkConfigError::MissingServiceAccount(name))
    }

    /// Contract name to `0x`-prefixed address for every contract aliased on
    /// `network`.
    pub fn contract_addresses(&self, network: &str) -> BTreeMap<String, String> {
        self.contracts
            .iter()
            .filter_map(|contract| {
                let raw = contract.aliases.get(network)?;
                let address = raw
                    .parse::<Address>()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| raw.clone());
                Some((contract.name.clone(), address))
            })
            .collect()
    }

    /// Configuration served to the front-end for `network`. Without a
    /// service account the credential fields stay empty.
    pub fn service_config(
        &self,
        network: &str,
        access_node: &str,
    ) -> Result<ServiceConfig, NetworkConfigError> {
        let mut config = ServiceConfig {
            flow_access_node: access_node.to_string(),
            contracts: self.contract_addresses(network),
            ..ServiceConfig::default()
        };

        let Ok(service) = self.service_account(network) else {
            tracing::warn!(network, "No service account, serving config without credentials");
            return Ok(config);
        };

        let keys = service
            .key
            .key_pair()
            .map_err(|e| NetworkConfigError::invalid("account", &service.name, e))?;
        config.flow_account_address = service.address.to_string();
        config.flow_account_private_key = keys.private_key_hex();
        config.flow_account_public_key = keys.public_key_hex();
        config.flow_account_key_id = service.key.index.to_string();
        Ok(config)
    }
}

/// Name of the service account for `network`, e.g. `emulator-account`.
pub fn service_account_name(network: &str) -> String {
    format!("{network}-account")
}

/// Errors raised while reading a network-configuration document.
#[derive(Debug, thiserror::Error)]
pub enum NetworkConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed network config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {kind} `{name}`: {reason}")]
    Invalid {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Service account `{0}` is not defined")]
    MissingServiceAccount(String),
}

impl NetworkConfigError {
    fn invalid(kind: &'static str, name: &str, reason: impl std::fmt::Display) -> Self {
        Self::Invalid {
            kind,
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMULATOR_PRIVATE_KEY: &str =
        "f8e188e8af0b8b414be59c4a1a15cc666c898fb34d94156e9b51e18bfde754a5";
    const EMULATOR_P256_PUBLIC_KEY: &str = "6e70492cb4ec2a6013e916114bc8bf6496f3335562f315e18b085c19da659bdfd88979a5904ae8bd9b4fd52a07fc759bad9551c04f289210784e7b08980516d2";

    const DOCUMENT: &str = r#"{
        "networks": {
            "emulator": "127.0.0.1:3569",
            "testnet": { "host": "access.devnet.nodes.onflow.org:9000" }
        },
        "accounts": {
            "emulator-account": {
                "address": "f8d6e0586b0a20c7",
                "key": "f8e188e8af0b8b414be59c4a1a15cc666c898fb34d94156e9b51e18bfde754a5"
            },
            "zeta": {
                "address": "0x01cf0e2f2f715450",
                "key": {
                    "type": "hex",
                    "index": 1,
                    "signatureAlgorithm": "ECDSA_P256",
                    "hashAlgorithm": "SHA3_256",
                    "privateKey": "aa"
                }
            },
            "alpha": { "address": "179b6b1cb6755e31", "key": "bb" }
        },
        "contracts": {
            "FungibleToken": {
                "source": "./FungibleToken.cdc",
                "aliases": { "emulator": "ee82856bf20e2aa6" }
            },
            "Local": "./Local.cdc"
        }
    }"#;

    #[test]
    fn parses_accounts_in_document_order() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let names: Vec<_> = config.accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["emulator-account", "zeta", "alpha"]);

        let zeta = config.account("zeta").unwrap();
        assert_eq!(zeta.key.index, 1);
        assert_eq!(zeta.key.signature_algorithm, SignatureAlgorithm::EcdsaP256);
        assert_eq!(zeta.key.hash_algorithm, HashAlgorithm::Sha3_256);
    }

    #[test]
    fn resolves_service_account_by_network() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let service = config.service_account("emulator").unwrap();
        assert_eq!(service.address.to_string(), "0xf8d6e0586b0a20c7");
        assert!(matches!(
            config.service_account("testnet"),
            Err(NetworkConfigError::MissingServiceAccount(name)) if name == "testnet-account"
        ));
    }

    #[test]
    fn contract_addresses_only_include_aliased_contracts() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let contracts = config.contract_addresses("emulator");
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts["FungibleToken"], "0xee82856bf20e2aa6");
        assert!(config.contract_addresses("testnet").is_empty());
    }

    #[test]
    fn bare_hex_key_defaults_to_p256_sha3() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let alpha = config.account("alpha").unwrap();
        assert_eq!(alpha.key.index, 0);
        assert_eq!(alpha.key.signature_algorithm, SignatureAlgorithm::EcdsaP256);
        assert_eq!(alpha.key.hash_algorithm, HashAlgorithm::Sha3_256);
    }

    #[test]
    fn unsupported_key_algorithms_are_rejected() {
        for key in [
            r#"{ "signatureAlgorithm": "BLS_BLS12_381", "privateKey": "aa" }"#,
            r#"{ "hashAlgorithm": "KMAC128", "privateKey": "aa" }"#,
        ] {
            let err = NetworkConfig::from_json(&format!(
                r#"{{ "accounts": {{ "odd": {{ "address": "01", "key": {key} }} }} }}"#
            ))
            .unwrap_err();
            assert!(matches!(
                err,
                NetworkConfigError::Invalid { kind: "account", ref name, .. } if name == "odd"
            ));
        }
    }

    #[test]
    fn bad_account_address_is_reported_by_name() {
        let err = NetworkConfig::from_json(
            r#"{ "accounts": { "broken": { "address": "xyz", "key": "aa" } } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NetworkConfigError::Invalid { kind: "account", ref name, .. } if name == "broken"
        ));
    }

    #[test]
    fn service_config_derives_public_key() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let served = config
            .service_config("emulator", "http://localhost:8888")
            .unwrap();

        assert_eq!(served.flow_account_address, "0xf8d6e0586b0a20c7");
        assert_eq!(served.flow_account_public_key, EMULATOR_P256_PUBLIC_KEY);
        assert_eq!(served.flow_account_key_id, "0");
        assert_eq!(served.flow_access_node, "http://localhost:8888");
        assert_eq!(served.contracts["FungibleToken"], "0xee82856bf20e2aa6");
    }

    #[test]
    fn service_config_honours_declared_curve() {
        let document = |algorithm: &str| {
            format!(
                r#"{{ "accounts": {{ "emulator-account": {{
                    "address": "f8d6e0586b0a20c7",
                    "key": {{
                        "type": "hex",
                        "index": 0,
                        "signatureAlgorithm": "{algorithm}",
                        "hashAlgorithm": "SHA3_256",
                        "privateKey": "{EMULATOR_PRIVATE_KEY}"
                    }}
                }} }} }}"#
            )
        };

        let p256 = NetworkConfig::from_json(&document("ECDSA_P256"))
            .unwrap()
            .service_config("emulator", "http://localhost:8888")
            .unwrap();
        assert_eq!(p256.flow_account_public_key, EMULATOR_P256_PUBLIC_KEY);

        let secp = NetworkConfig::from_json(&document("ECDSA_secp256k1"))
            .unwrap()
            .service_config("emulator", "http://localhost:8888")
            .unwrap();
        let expected = KeyPair::from_private_key_hex(
            EMULATOR_PRIVATE_KEY,
            SignatureAlgorithm::EcdsaSecp256k1,
            HashAlgorithm::Sha3_256,
        )
        .unwrap();
        assert_eq!(secp.flow_account_public_key, expected.public_key_hex());
        assert_ne!(secp.flow_account_public_key, EMULATOR_P256_PUBLIC_KEY);
    }

    #[test]
    fn service_config_without_service_account_has_no_credentials() {
        let config = NetworkConfig::from_json(DOCUMENT).unwrap();
        let served = config.service_config("testnet", "https://rest-testnet").unwrap();
        assert!(served.flow_account_address.is_empty());
        assert_eq!(served.flow_access_node, "https://rest-testnet");
    }

    #[test]
    fn empty_document_is_valid() {
        let config = NetworkConfig::from_json("{}").unwrap();
        assert!(config.accounts.is_empty());
    }
}
