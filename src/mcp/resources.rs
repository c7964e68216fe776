// ABOUTME: Centralized resource container for dependency injection in MCP server
// ABOUTME: Owns the nutrition table, optional menu store, planner tunables, and random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources Module
//!
//! Built once at startup and shared behind `Arc` by the request processor
//! and every tool execution. Mutable state (the menu store and the random
//! source) sits behind `tokio::sync::Mutex`; when both are needed the store
//! lock is taken first.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::{MealPlannerConfig, ServerConfig};
use crate::database::MenuStore;
use crate::errors::AppResult;
use crate::intelligence::FoodTable;

/// Shared server state
pub struct ServerResources {
    /// Fixed nutrition table
    pub foods: FoodTable,
    /// Registered menus; `None` when the store is disabled
    pub menu_store: Option<Mutex<MenuStore>>,
    /// Composer and assembler tunables
    pub planner: MealPlannerConfig,
    /// Random source for vegetable, grain, and menu picks
    pub rng: Mutex<ChaCha8Rng>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        foods: FoodTable,
        menu_store: Option<MenuStore>,
        planner: MealPlannerConfig,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            foods,
            menu_store: menu_store.map(Mutex::new),
            planner,
            rng: Mutex::new(rng),
        }
    }

    /// Build resources from server configuration, opening the menu store if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created or the file cannot be written
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let menu_store = if config.menu_store.enabled {
            let store = MenuStore::open(&config.menu_store.path)?;
            info!(
                path = %store.path().display(),
                menus = store.count(),
                "Menu store opened"
            );
            Some(store)
        } else {
            warn!("Menu store disabled; menu tools will report unavailable");
            None
        };

        Ok(Self::new(
            FoodTable::standard(),
            menu_store,
            config.planner.clone(),
            config.seed,
        ))
    }

    /// Whether a menu store is configured
    #[must_use]
    pub const fn has_menu_store(&self) -> bool {
        self.menu_store.is_some()
    }
}
