// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Each submodule corresponds to a tool category with feature flag support.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `meals` - Meal composition, nutrition lookup, generated plans
//! - `menus` - Registered menu management and menu-based plans
//!
//! Each category is conditionally compiled based on feature flags.

// Argument extraction shared by both categories
#[cfg(any(feature = "tools-meals", feature = "tools-menus"))]
mod params;

// Meal tools: suggest_meal, get_nutrition_info, search_foods, create_meal_plan
#[cfg(feature = "tools-meals")]
pub mod meals;

// Menu tools: register_menu, get_menu, list_menus, update_menu, delete_menu, etc.
#[cfg(feature = "tools-menus")]
pub mod menus;
