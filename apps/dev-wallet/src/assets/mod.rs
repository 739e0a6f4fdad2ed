// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Packaged Front-end Assets
//!
//! The wallet front-end ships as a zip bundle. At startup the bundle is read
//! once into an [`AssetArchive`], an immutable path → bytes map that every
//! request reads without locking.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use axum::body::Bytes;

pub mod resolver;

pub use resolver::{ResolvedAsset, ROOT_DOCUMENT};

/// Bundle compiled into the binary.
pub const EMBEDDED_BUNDLE: &[u8] = include_bytes!("../../assets/bundle.zip");

/// Immutable in-memory index of packaged files.
#[derive(Debug, Clone, Default)]
pub struct AssetArchive {
    entries: HashMap<String, Bytes>,
}

impl AssetArchive {
    /// Read every file entry of a zip blob. Directory entries are skipped.
    pub fn from_zip(blob: &[u8]) -> Result<Self, ArchiveError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(blob))?;
        let mut entries = HashMap::with_capacity(zip.len());

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let Some(path) = normalize_entry_name(file.name())? else {
                continue;
            };
            let mut content = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
            file.read_to_end(&mut content)
                .map_err(|source| ArchiveError::Read {
                    entry: path.clone(),
                    source,
                })?;
            entries.insert(path, Bytes::from(content));
        }

        tracing::debug!(entries = entries.len(), "Asset archive loaded");
        Ok(Self { entries })
    }

    /// The bundle compiled into the binary.
    pub fn embedded() -> Result<Self, ArchiveError> {
        Self::from_zip(EMBEDDED_BUNDLE)
    }

    /// Load a bundle from disk.
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let blob = std::fs::read(path).map_err(|source| ArchiveError::Read {
            entry: path.display().to_string(),
            source,
        })?;
        Self::from_zip(&blob)
    }

    /// Build an archive from in-memory entries.
    pub fn from_entries<I, P, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Bytes>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Bytes> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip `./` and `/` prefixes; reject names that climb out of the archive.
fn normalize_entry_name(name: &str) -> Result<Option<String>, ArchiveError> {
    let mut trimmed = name;
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }

    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(ArchiveError::UnsafePath(name.to_string()));
    }
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

/// Errors raised while loading the asset bundle.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Invalid bundle: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to read {entry}: {source}")]
    Read {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Bundle entry escapes the archive root: {0}")]
    UnsafePath(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_of(files: &[(&str, &str)], dirs: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for dir in dirs {
            writer.add_directory(*dir, SimpleFileOptions::default()).unwrap();
        }
        for (name, content) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn loads_files_and_skips_directories() {
        let blob = zip_of(
            &[("index.html", "<html>"), ("./img/logo.svg", "<svg>")],
            &["img/"],
        );
        let archive = AssetArchive::from_zip(&blob).unwrap();

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.get("index.html").unwrap().as_ref(), b"<html>");
        assert!(archive.contains("img/logo.svg"));
        assert!(!archive.contains("img/"));
    }

    #[test]
    fn rejects_parent_directory_entries() {
        let blob = zip_of(&[("../secret", "x")], &[]);
        assert!(matches!(
            AssetArchive::from_zip(&blob),
            Err(ArchiveError::UnsafePath(_))
        ));
    }

    #[test]
    fn rejects_non_zip_blobs() {
        assert!(matches!(
            AssetArchive::from_zip(b"definitely not a zip"),
            Err(ArchiveError::Zip(_))
        ));
    }

    #[test]
    fn embedded_bundle_has_root_document() {
        let archive = AssetArchive::embedded().unwrap();
        assert!(archive.contains(ROOT_DOCUMENT));
        assert!(archive.contains("authn.html"));
    }

    #[test]
    fn missing_bundle_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetArchive::load(&dir.path().join("bundle.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::Read { .. }));
    }
}
