// ABOUTME: Configuration module for server settings and meal planning tunables
// ABOUTME: Handles environment-driven server config and algorithm parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the meal planner MCP server
//!
//! - **Environment**: store location, random seed, deployment mode
//! - **Planner**: composer and plan assembler tunables

/// Environment and server configuration
pub mod environment;
/// Meal composer and plan assembler parameters
pub mod planner;

pub use environment::{default_store_path, Environment, MenuStoreConfig, ServerConfig};
pub use planner::MealPlannerConfig;
