// ABOUTME: Core data models for foods, registered menus, and computed meals and plans
// ABOUTME: Re-exports FoodItem, NutritionFacts, RegisteredMenu, MealSuggestion, MealPlan and friends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! All models serialize with camelCase field names, which is the shape MCP
//! clients see in tool responses and the shape the menu store persists.
//!
//! - `FoodItem`: one row of the fixed nutrition table
//! - `RegisteredMenu`: a user recipe owned by the menu store
//! - `MealSuggestion`: a computed single meal
//! - `MealPlan`: computed days plus a summary of averages

/// Foods, categories, meal slots, and nutrition totals
pub mod food;
/// Computed meals and plans
pub mod meal;
/// Registered menus and their input shapes
pub mod menu;

pub use food::{protein_to_fat_ratio, FoodCategory, FoodItem, MealType, NutritionFacts};
pub use meal::{DailyMealPlan, MealPlan, MealSuggestion, PlanSummary};
pub use menu::{
    MenuListFilter, MenuRegistration, MenuSuggestionCriteria, MenuUpdate, RegisteredMenu,
};
