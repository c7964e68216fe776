// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides seeded RNGs, temp-dir menu stores, sample menus, and MCP wiring helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `meal_planner_mcp_server`

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use meal_planner_mcp_server::config::MealPlannerConfig;
use meal_planner_mcp_server::database::MenuStore;
use meal_planner_mcp_server::intelligence::FoodTable;
use meal_planner_mcp_server::mcp::mcp_request_processor::McpRequestProcessor;
use meal_planner_mcp_server::mcp::resources::ServerResources;
use meal_planner_mcp_server::models::{MealType, MenuRegistration, NutritionFacts};
use meal_planner_mcp_server::tools::ToolRegistry;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Fixed seed used across tests
pub const TEST_SEED: u64 = 42;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(TEST_SEED)
}

/// Store file path inside a fresh temp dir; keep the `TempDir` alive for the test
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("menus.json");
    (dir, path)
}

/// Empty store in a fresh temp dir
pub fn temp_store() -> (TempDir, MenuStore) {
    init_test_logging();
    let (dir, path) = temp_store_path();
    let store = MenuStore::open(path).expect("open menu store");
    (dir, store)
}

pub fn nutrition(calories: f64, protein: f64, fat: f64) -> NutritionFacts {
    NutritionFacts {
        calories,
        protein,
        fat,
        carbohydrates: 30.0,
        fiber: 4.0,
        sodium: 150.0,
    }
}

pub fn registration(
    name: &str,
    meal_type: MealType,
    nutrition: NutritionFacts,
    tags: &[&str],
) -> MenuRegistration {
    MenuRegistration {
        name: name.to_owned(),
        description: format!("{name} test recipe"),
        ingredients: vec!["100g placeholder".to_owned()],
        instructions: vec!["Combine and serve".to_owned()],
        meal_type,
        nutrition,
        prep_time: 10,
        servings: 1,
        tags: tags.iter().map(|&tag| tag.to_owned()).collect(),
    }
}

/// Vegetarian breakfast with a 7.5 protein-to-fat ratio
pub fn protein_oats() -> MenuRegistration {
    MenuRegistration {
        name: "Protein Oats".to_owned(),
        description: "Oats with greek yogurt and berries".to_owned(),
        ingredients: vec![
            "50g oats".to_owned(),
            "150g greek yogurt".to_owned(),
            "50g blueberries".to_owned(),
        ],
        instructions: vec!["Mix".to_owned(), "Chill overnight".to_owned()],
        meal_type: MealType::Breakfast,
        nutrition: NutritionFacts {
            calories: 350.0,
            protein: 30.0,
            fat: 4.0,
            carbohydrates: 45.0,
            fiber: 6.0,
            sodium: 120.0,
        },
        prep_time: 5,
        servings: 1,
        tags: vec!["vegetarian".to_owned(), "quick".to_owned()],
    }
}

/// Resources with the standard food table and a seeded RNG
pub fn resources(store: Option<MenuStore>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(
        FoodTable::standard(),
        store,
        MealPlannerConfig::default(),
        Some(TEST_SEED),
    ))
}

pub fn processor(resources: Arc<ServerResources>) -> McpRequestProcessor {
    McpRequestProcessor::new(resources, Arc::new(ToolRegistry::with_builtin_tools()))
}

/// Processor backed by a temp-dir store
pub fn processor_with_store() -> (TempDir, McpRequestProcessor) {
    let (dir, store) = temp_store();
    (dir, processor(resources(Some(store))))
}

/// Processor with menu persistence disabled
pub fn processor_without_store() -> McpRequestProcessor {
    processor(resources(None))
}
