// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Route Dispatcher
//!
//! Every path under [`API_PREFIX`] maps to one account-bridge operation or
//! the config endpoint. Anything else falls through to the packaged
//! front-end.

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{AccountDirectoryEntry, ServiceConfig},
    state::AppState,
};

pub mod accounts;
pub mod assets;
pub mod config;

pub const API_PREFIX: &str = "/api";

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(config::get_config))
        .route("/config", get(config::get_config))
        .route("/accounts", get(accounts::list_accounts))
        .route("/accounts/create", post(accounts::create_account))
        .route(
            "/accounts/create/{name}",
            post(accounts::create_named_account),
        )
        .route("/accounts/{address}", get(accounts::get_account))
        .route("/accounts/{address}/update", post(accounts::update_account))
        .route(
            "/accounts/{address}/update/{name}",
            post(accounts::update_account_name),
        )
        .route(
            "/accounts/{address}/delete",
            get(accounts::delete_account).post(accounts::delete_account),
        )
        .route("/accounts/{address}/fund", any(accounts::fund_account))
        .route(
            "/accounts/{address}/fusd",
            any(accounts::fund_auxiliary_token),
        );

    Router::new()
        .nest(API_PREFIX, api_routes)
        .route("/api/", get(config::get_config))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .fallback(assets::serve_asset)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        config::get_config,
        accounts::list_accounts,
        accounts::get_account,
        accounts::create_account,
        accounts::create_named_account,
        accounts::update_account,
        accounts::update_account_name,
        accounts::delete_account,
        accounts::fund_account,
        accounts::fund_auxiliary_token
    ),
    components(schemas(AccountDirectoryEntry, ServiceConfig)),
    tags(
        (name = "Accounts", description = "FCL account directory"),
        (name = "Config", description = "Service account and network configuration")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_lists_account_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/accounts"));
        assert!(doc.paths.paths.contains_key("/api/accounts/{address}/update/{name}"));
        assert!(doc.paths.paths.contains_key("/api/config"));
    }
}
