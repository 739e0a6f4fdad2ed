// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fallback handler: every path not claimed by the API is a packaged asset.

use axum::{
    extract::State,
    http::{header, Method, Uri},
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, state::AppState};

pub async fn serve_asset(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return ApiError::method_not_allowed().into_response();
    }

    match state.assets.resolve(uri.path()) {
        Some(asset) => (
            [(header::CONTENT_TYPE, asset.content_type)],
            asset.body,
        )
            .into_response(),
        None => {
            tracing::debug!(path = %uri.path(), "No packaged asset");
            ApiError::not_found("Not Found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{body::to_bytes, http::StatusCode};

    use crate::assets::AssetArchive;
    use crate::bridge::StaticStub;
    use crate::models::ServiceConfig;

    fn state() -> AppState {
        AppState::new(
            Arc::new(StaticStub),
            ServiceConfig::default(),
            AssetArchive::from_entries([
                ("index.html", "<html>root</html>"),
                ("dashboard.html", "<html>dashboard</html>"),
                ("styles.css", "body{}"),
            ]),
        )
    }

    async fn body_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_literal_asset_with_content_type() {
        let response = serve_asset(State(state()), Method::GET, Uri::from_static("/styles.css")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
        assert_eq!(body_of(response).await, "body{}");
    }

    #[tokio::test]
    async fn client_route_falls_back_to_html_document() {
        let response = serve_asset(State(state()), Method::GET, Uri::from_static("/dashboard")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "<html>dashboard</html>");
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let response = serve_asset(State(state()), Method::GET, Uri::from_static("/settings")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_get_methods_are_rejected() {
        let response = serve_asset(State(state()), Method::POST, Uri::from_static("/")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
