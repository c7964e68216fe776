// ABOUTME: Meal planning intelligence: nutrition table, meal composer, and plan assembler
// ABOUTME: Pure, synchronous logic; randomness is always supplied by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The planning core. Nothing here performs I/O; the menu store is only read
//! through `MenuStore::suggest` when assembling plans from registered menus.

/// Fixed nutrition table
pub mod food_table;
/// Single-meal composition
pub mod meal_composer;
/// Multi-day plan assembly
pub mod plan_assembler;

pub use food_table::FoodTable;
pub use meal_composer::{CompositionError, MealComposer, MealRequest};
pub use plan_assembler::{PlanAssembler, PlanRequest};
