// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-path resolution with single-page-app fallback.
//!
//! For a request path `p` (leading `/` stripped):
//! 1. empty `p` serves [`ROOT_DOCUMENT`];
//! 2. a literal entry at `p` is served as-is;
//! 3. otherwise `p.html` is tried, so client-side routes such as `/authn`
//!    reach their pre-rendered document;
//! 4. otherwise nothing matches.
//!
//! The literal lookup must come first so real static files are never
//! shadowed by a route document.

use axum::body::Bytes;

use super::AssetArchive;

/// Document served for the bare `/` path.
pub const ROOT_DOCUMENT: &str = "index.html";

/// A resolved archive entry ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Archive path that matched.
    pub path: String,
    pub content_type: String,
    pub body: Bytes,
}

impl AssetArchive {
    /// Map a request path to an archive entry.
    pub fn resolve(&self, request_path: &str) -> Option<ResolvedAsset> {
        let path = request_path.trim_start_matches('/');

        let candidate = if path.is_empty() {
            ROOT_DOCUMENT.to_string()
        } else if self.contains(path) {
            path.to_string()
        } else {
            format!("{path}.html")
        };

        let body = self.get(&candidate)?.clone();
        Some(ResolvedAsset {
            content_type: content_type_for(&candidate),
            path: candidate,
            body,
        })
    }
}

fn content_type_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive() -> AssetArchive {
        AssetArchive::from_entries([
            ("index.html", "root"),
            ("dashboard.html", "dashboard page"),
            ("styles.css", "body{}"),
            ("dashboard", "literal file"),
            ("img/logo.svg", "<svg/>"),
            ("blob", "bytes"),
        ])
    }

    #[test]
    fn empty_path_serves_root_document() {
        let asset = archive().resolve("/").unwrap();
        assert_eq!(asset.path, "index.html");
        assert_eq!(asset.content_type, "text/html");
        assert_eq!(asset.body.as_ref(), b"root");
    }

    #[test]
    fn literal_entries_are_served_with_their_bytes() {
        let asset = archive().resolve("/styles.css").unwrap();
        assert_eq!(asset.body.as_ref(), b"body{}");
        assert_eq!(asset.content_type, "text/css");

        let svg = archive().resolve("/img/logo.svg").unwrap();
        assert_eq!(svg.content_type, "image/svg+xml");
    }

    #[test]
    fn literal_entry_wins_over_route_document() {
        let asset = archive().resolve("/dashboard").unwrap();
        assert_eq!(asset.path, "dashboard");
        assert_eq!(asset.body.as_ref(), b"literal file");
    }

    #[test]
    fn extensionless_route_falls_back_to_html() {
        let archive = AssetArchive::from_entries([("settings.html", "settings page")]);
        let asset = archive.resolve("/settings").unwrap();
        assert_eq!(asset.path, "settings.html");
        assert_eq!(asset.content_type, "text/html");
        assert_eq!(asset.body.as_ref(), b"settings page");
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert!(archive().resolve("/missing").is_none());
        assert!(archive().resolve("/missing.js").is_none());
        assert!(AssetArchive::default().resolve("/").is_none());
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        let asset = archive().resolve("/blob").unwrap();
        assert_eq!(asset.content_type, "application/octet-stream");
    }
}
