// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::assets::AssetArchive;
use crate::bridge::{AccountBridge, StaticStub};
use crate::models::ServiceConfig;

/// Shared, read-only handler state. The bridge owns all mutable account data.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<dyn AccountBridge>,
    pub config: Arc<ServiceConfig>,
    pub assets: Arc<AssetArchive>,
}

impl AppState {
    pub fn new(bridge: Arc<dyn AccountBridge>, config: ServiceConfig, assets: AssetArchive) -> Self {
        Self {
            bridge,
            config: Arc::new(config),
            assets: Arc::new(assets),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(StaticStub),
            ServiceConfig::default(),
            AssetArchive::default(),
        )
    }
}
