// ABOUTME: Meal composition and plan assembly tunables with environment overrides
// ABOUTME: Defaults come from the nutrition and meal_split constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{meal_split, nutrition};
use crate::models::MealType;

/// Tunables for the meal composer and plan assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlannerConfig {
    /// Share of a meal's target calories given to the protein item
    pub protein_calorie_share: f64,
    /// Calories reserved for the two vegetables
    pub vegetable_calorie_allowance: f64,
    /// Remaining calories above which a grain is added
    pub grain_calorie_threshold: f64,
    /// Serving multiplier for the first vegetable
    pub primary_vegetable_serving: f64,
    /// Serving multiplier for the second vegetable
    pub secondary_vegetable_serving: f64,
    /// Serving multiplier for breakfast/snack fruit
    pub fruit_serving: f64,
    /// Slot calorie multiplier used as `maxCalories` when drawing registered menus
    pub menu_calorie_headroom: f64,
    /// Daily calorie share for breakfast
    pub breakfast_share: f64,
    /// Daily calorie share for lunch
    pub lunch_share: f64,
    /// Daily calorie share for dinner
    pub dinner_share: f64,
    /// Daily calorie share for the snack
    pub snack_share: f64,
}

impl Default for MealPlannerConfig {
    fn default() -> Self {
        Self {
            protein_calorie_share: nutrition::PROTEIN_CALORIE_SHARE,
            vegetable_calorie_allowance: nutrition::VEGETABLE_CALORIE_ALLOWANCE,
            grain_calorie_threshold: nutrition::GRAIN_CALORIE_THRESHOLD,
            primary_vegetable_serving: nutrition::PRIMARY_VEGETABLE_SERVING,
            secondary_vegetable_serving: nutrition::SECONDARY_VEGETABLE_SERVING,
            fruit_serving: nutrition::FRUIT_SERVING,
            menu_calorie_headroom: nutrition::MENU_CALORIE_HEADROOM,
            breakfast_share: meal_split::BREAKFAST,
            lunch_share: meal_split::LUNCH,
            dinner_share: meal_split::DINNER,
            snack_share: meal_split::SNACK,
        }
    }
}

impl MealPlannerConfig {
    /// Load tunables from `MEAL_PLANNER_*` variables, keeping defaults for unset or invalid values
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            protein_calorie_share: share_var(
                "MEAL_PLANNER_PROTEIN_CALORIE_SHARE",
                defaults.protein_calorie_share,
            ),
            vegetable_calorie_allowance: non_negative_var(
                "MEAL_PLANNER_VEGETABLE_CALORIE_ALLOWANCE",
                defaults.vegetable_calorie_allowance,
            ),
            grain_calorie_threshold: non_negative_var(
                "MEAL_PLANNER_GRAIN_CALORIE_THRESHOLD",
                defaults.grain_calorie_threshold,
            ),
            primary_vegetable_serving: non_negative_var(
                "MEAL_PLANNER_PRIMARY_VEGETABLE_SERVING",
                defaults.primary_vegetable_serving,
            ),
            secondary_vegetable_serving: non_negative_var(
                "MEAL_PLANNER_SECONDARY_VEGETABLE_SERVING",
                defaults.secondary_vegetable_serving,
            ),
            fruit_serving: non_negative_var("MEAL_PLANNER_FRUIT_SERVING", defaults.fruit_serving),
            menu_calorie_headroom: non_negative_var(
                "MEAL_PLANNER_MENU_CALORIE_HEADROOM",
                defaults.menu_calorie_headroom,
            ),
            breakfast_share: share_var("MEAL_PLANNER_BREAKFAST_SHARE", defaults.breakfast_share),
            lunch_share: share_var("MEAL_PLANNER_LUNCH_SHARE", defaults.lunch_share),
            dinner_share: share_var("MEAL_PLANNER_DINNER_SHARE", defaults.dinner_share),
            snack_share: share_var("MEAL_PLANNER_SNACK_SHARE", defaults.snack_share),
        }
    }

    /// Daily calorie share for a slot
    #[must_use]
    pub const fn share_for(&self, meal_type: MealType) -> f64 {
        match meal_type {
            MealType::Breakfast => self.breakfast_share,
            MealType::Lunch => self.lunch_share,
            MealType::Dinner => self.dinner_share,
            MealType::Snack => self.snack_share,
        }
    }

    /// Slot calorie target, rounded independently per slot
    #[must_use]
    pub fn slot_calories(&self, daily_calories: f64, meal_type: MealType) -> f64 {
        (daily_calories * self.share_for(meal_type)).round()
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<Result<T, String>> {
    env::var(name)
        .ok()
        .map(|raw| raw.trim().parse::<T>().map_err(|_| raw))
}

fn non_negative_var(name: &str, default: f64) -> f64 {
    match parse_var::<f64>(name) {
        None => default,
        Some(Ok(value)) if value.is_finite() && value >= 0.0 => value,
        Some(Ok(value)) => {
            warn!(variable = name, value, "Negative tunable ignored, using default {default}");
            default
        }
        Some(Err(raw)) => {
            warn!(variable = name, raw = %raw, "Unparseable tunable ignored, using default {default}");
            default
        }
    }
}

fn share_var(name: &str, default: f64) -> f64 {
    let value = non_negative_var(name, default);
    if value > 1.0 {
        warn!(variable = name, value, "Share above 1.0 ignored, using default {default}");
        return default;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split_covers_the_day() {
        let config = MealPlannerConfig::default();
        let total: f64 = MealType::ALL
            .into_iter()
            .map(|meal_type| config.share_for(meal_type))
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slot_calories_round_independently() {
        let config = MealPlannerConfig::default();
        assert!((config.slot_calories(1800.0, MealType::Breakfast) - 450.0).abs() < f64::EPSILON);
        assert!((config.slot_calories(1800.0, MealType::Lunch) - 630.0).abs() < f64::EPSILON);
        assert!((config.slot_calories(1850.0, MealType::Snack) - 93.0).abs() < f64::EPSILON);
    }
}
