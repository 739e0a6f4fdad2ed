// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{models::ServiceConfig, state::AppState};

#[utoipa::path(
    get,
    path = "/api/config",
    tag = "Config",
    responses((status = 200, body = ServiceConfig))
)]
pub async fn get_config(State(state): State<AppState>) -> Json<ServiceConfig> {
    Json(state.config.as_ref().clone())
}
