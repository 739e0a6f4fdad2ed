// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{AccountDirectoryEntry, Address},
    state::AppState,
};

/// Plain acknowledgement body for mutations without a payload.
pub const OK_BODY: &str = "OK";

#[derive(Debug, Deserialize, IntoParams)]
pub struct NameQuery {
    /// Account label.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FundQuery {
    /// Requested amount. Ignored.
    pub amount: Option<u64>,
}

fn parse_address(raw: &str) -> Result<Address, ApiError> {
    Ok(raw.parse::<Address>()?)
}

fn required_name(query: NameQuery) -> Result<String, ApiError> {
    query
        .name
        .ok_or_else(|| ApiError::bad_request("Missing name parameter"))
}

#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Accounts",
    responses((status = 200, body = [AccountDirectoryEntry]))
)]
pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountDirectoryEntry>> {
    Json(state.bridge.list_accounts().await)
}

#[utoipa::path(
    get,
    path = "/api/accounts/{address}",
    params(("address" = String, Path, description = "Account address, optional 0x prefix")),
    tag = "Accounts",
    responses(
        (status = 200, body = AccountDirectoryEntry),
        (status = 400, description = "Malformed address"),
        (status = 404, description = "Unknown account"),
        (status = 502, description = "Access node unreachable")
    )
)]
pub async fn get_account(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AccountDirectoryEntry>, ApiError> {
    let address = parse_address(&address)?;
    Ok(Json(state.bridge.get_account(&address).await?))
}

#[utoipa::path(
    post,
    path = "/api/accounts/create",
    params(NameQuery),
    tag = "Accounts",
    responses(
        (status = 200, body = AccountDirectoryEntry),
        (status = 400, description = "Missing or empty name"),
        (status = 501, description = "Backend cannot create accounts")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<AccountDirectoryEntry>, ApiError> {
    let name = required_name(query)?;
    Ok(Json(state.bridge.create_account(&name).await?))
}

#[utoipa::path(
    post,
    path = "/api/accounts/create/{name}",
    params(("name" = String, Path, description = "Label of the new account")),
    tag = "Accounts",
    responses(
        (status = 200, body = AccountDirectoryEntry),
        (status = 501, description = "Backend cannot create accounts")
    )
)]
pub async fn create_named_account(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AccountDirectoryEntry>, ApiError> {
    Ok(Json(state.bridge.create_account(&name).await?))
}

#[utoipa::path(
    post,
    path = "/api/accounts/{address}/update",
    params(
        ("address" = String, Path, description = "Account address"),
        NameQuery
    ),
    tag = "Accounts",
    responses(
        (status = 200, body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn update_account(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<&'static str, ApiError> {
    let address = parse_address(&address)?;
    let name = required_name(query)?;
    state.bridge.rename_account(&address, &name).await?;
    Ok(OK_BODY)
}

#[utoipa::path(
    post,
    path = "/api/accounts/{address}/update/{name}",
    params(
        ("address" = String, Path, description = "Account address"),
        ("name" = String, Path, description = "New label")
    ),
    tag = "Accounts",
    responses(
        (status = 200, body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn update_account_name(
    Path((address, name)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<&'static str, ApiError> {
    let address = parse_address(&address)?;
    state.bridge.rename_account(&address, &name).await?;
    Ok(OK_BODY)
}

#[utoipa::path(
    post,
    path = "/api/accounts/{address}/delete",
    params(("address" = String, Path, description = "Account address")),
    tag = "Accounts",
    responses(
        (status = 200, body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown account"),
        (status = 501, description = "Backend cannot delete accounts")
    )
)]
pub async fn delete_account(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<&'static str, ApiError> {
    let address = parse_address(&address)?;
    state.bridge.delete_account(&address).await?;
    Ok(OK_BODY)
}

#[utoipa::path(
    post,
    path = "/api/accounts/{address}/fund",
    params(("address" = String, Path, description = "Account address"), FundQuery),
    tag = "Accounts",
    responses((status = 200, body = String, content_type = "text/plain"))
)]
pub async fn fund_account(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<FundQuery>,
) -> Result<&'static str, ApiError> {
    let address = parse_address(&address)?;
    state.bridge.fund_account(&address, query.amount).await?;
    Ok(OK_BODY)
}

#[utoipa::path(
    post,
    path = "/api/accounts/{address}/fusd",
    params(("address" = String, Path, description = "Account address")),
    tag = "Accounts",
    responses((status = 200, body = String, content_type = "text/plain"))
)]
pub async fn fund_auxiliary_token(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<&'static str, ApiError> {
    let address = parse_address(&address)?;
    state.bridge.fund_auxiliary_token(&address).await?;
    Ok(OK_BODY)
}
