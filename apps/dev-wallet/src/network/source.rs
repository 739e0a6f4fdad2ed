// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup resolution of the network-configuration document.
//!
//! When no document exists at the configured path, the embedded default is
//! written to a uniquely named file in the temp directory and used instead.
//! The file is removed when the source is dropped. The resolved source is
//! handed to backend construction explicitly.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use super::config::{NetworkConfig, NetworkConfigError};

/// Default document compiled into the binary.
pub const DEFAULT_NETWORK_CONFIG: &str = include_str!("../../assets/flow.json");

/// Where the network-configuration document comes from.
#[derive(Debug)]
pub enum NetworkConfigSource {
    /// A document that already existed on disk.
    OnDisk(PathBuf),
    /// The embedded default, written out to a `flow-*.json` temp file.
    EmbeddedDefault(TempPath),
}

impl NetworkConfigSource {
    /// Resolve `path`, materializing the embedded default into the OS temp
    /// directory if nothing exists there.
    pub fn resolve(path: &Path) -> Result<Self, NetworkConfigError> {
        Self::resolve_in(path, &std::env::temp_dir())
    }

    /// Like [`resolve`](Self::resolve) with an explicit materialization
    /// directory.
    pub fn resolve_in(path: &Path, temp_dir: &Path) -> Result<Self, NetworkConfigError> {
        if path.is_file() {
            return Ok(Self::OnDisk(path.to_path_buf()));
        }

        let io_error = |source: std::io::Error| NetworkConfigError::Io {
            path: temp_dir.display().to_string(),
            source,
        };
        let mut file = tempfile::Builder::new()
            .prefix("flow-")
            .suffix(".json")
            .tempfile_in(temp_dir)
            .map_err(io_error)?;
        file.write_all(DEFAULT_NETWORK_CONFIG.as_bytes())
            .and_then(|()| file.flush())
            .map_err(io_error)?;
        let target = file.into_temp_path();

        tracing::info!(
            requested = %path.display(),
            materialized = %target.display(),
            "Network config not found, using embedded default"
        );
        Ok(Self::EmbeddedDefault(target))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::OnDisk(path) => path,
            Self::EmbeddedDefault(path) => path,
        }
    }

    pub fn load(&self) -> Result<NetworkConfig, NetworkConfigError> {
        NetworkConfig::load(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_file_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.json");
        std::fs::write(&path, r#"{ "accounts": {} }"#).unwrap();

        let source = NetworkConfigSource::resolve_in(&path, dir.path()).unwrap();
        assert!(matches!(&source, NetworkConfigSource::OnDisk(p) if *p == path));
        assert!(source.load().unwrap().accounts.is_empty());
    }

    #[test]
    fn missing_file_materializes_embedded_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let source = NetworkConfigSource::resolve_in(&missing, dir.path()).unwrap();
        assert!(matches!(source, NetworkConfigSource::EmbeddedDefault(_)));
        assert!(!missing.exists());

        let materialized = source.path().to_path_buf();
        assert!(materialized.starts_with(dir.path()));
        let file_name = materialized.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("flow-") && file_name.ends_with(".json"));

        let config = source.load().unwrap();
        let service = config.service_account("emulator").unwrap();
        assert_eq!(service.address.to_string(), "0xf8d6e0586b0a20c7");

        drop(source);
        assert!(!materialized.exists());
    }

    #[test]
    fn concurrent_resolutions_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let first = NetworkConfigSource::resolve_in(&missing, dir.path()).unwrap();
        let second = NetworkConfigSource::resolve_in(&missing, dir.path()).unwrap();

        assert_ne!(first.path(), second.path());
        assert!(first.load().is_ok());
        assert!(second.load().is_ok());
    }

    #[test]
    fn embedded_default_parses() {
        let config = NetworkConfig::from_json(DEFAULT_NETWORK_CONFIG).unwrap();
        assert!(config.service_account("emulator").is_ok());
        assert!(config.contract_addresses("emulator").contains_key("FlowToken"));
    }
}
