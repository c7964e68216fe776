// ABOUTME: Main library entry point for the meal planner MCP server
// ABOUTME: Exposes meal composition, plan assembly, and a persistent menu store as MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Planner MCP Server
//!
//! A Model Context Protocol server that suggests low-fat, high-protein meals,
//! assembles multi-day plans, and keeps a persistent collection of
//! user-registered recipes ("menus").
//!
//! ## Architecture
//!
//! - **Models**: foods, meals, plans, registered menus
//! - **Intelligence**: nutrition table, meal composer, plan assembler
//! - **Database**: JSON-file menu store with atomic rewrites
//! - **Tools**: one `McpTool` per MCP tool, dispatched through a registry
//! - **MCP**: JSON-RPC routing and the stdio transport
//!
//! ## Example Usage
//!
//! ```rust
//! use meal_planner_mcp_server::config::MealPlannerConfig;
//! use meal_planner_mcp_server::intelligence::{FoodTable, MealComposer, MealRequest};
//! use meal_planner_mcp_server::models::MealType;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let foods = FoodTable::standard();
//! let config = MealPlannerConfig::default();
//! let composer = MealComposer::new(&foods, &config);
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let meal = composer
//!     .compose(&MealRequest::new(MealType::Lunch), &mut rng)
//!     .unwrap();
//! assert_eq!(meal.servings, 1);
//! ```

/// Configuration: environment, menu store location, planner tunables
pub mod config;

/// Application constants grouped by domain
pub mod constants;

/// Persistent menu store
pub mod database;

/// Unified error handling with standard error codes
pub mod errors;

/// Nutrition table, meal composer, and plan assembler
pub mod intelligence;

/// JSON-RPC 2.0 envelope types
pub mod jsonrpc;

/// Structured logging to stderr
pub mod logging;

/// MCP protocol schema, request processing, and stdio transport
pub mod mcp;

/// Domain data types
pub mod models;

/// MCP tool trait, registry, and implementations
pub mod tools;
