// ABOUTME: Computed meal and plan results returned by the composer and plan assembler
// ABOUTME: MealSuggestion, DailyMealPlan, MealPlan, and PlanSummary are never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::models::food::{MealType, NutritionFacts};
use crate::models::menu::RegisteredMenu;

/// A single meal, either composed from the nutrition table or taken from a registered menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Ingredient lines with quantities
    pub ingredients: Vec<String>,
    /// Cooking steps
    pub instructions: Vec<String>,
    /// Aggregated nutrition
    pub total_nutrition: NutritionFacts,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Servings
    pub servings: u32,
    /// Meal slot
    pub meal_type: MealType,
}

impl From<&RegisteredMenu> for MealSuggestion {
    fn from(menu: &RegisteredMenu) -> Self {
        Self {
            name: menu.name.clone(),
            description: menu.description.clone(),
            ingredients: menu.ingredients.clone(),
            instructions: menu.instructions.clone(),
            total_nutrition: menu.nutrition,
            prep_time: menu.prep_time,
            servings: menu.servings,
            meal_type: menu.meal_type,
        }
    }
}

/// One day of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealPlan {
    /// 1-based day number
    pub day: u32,
    /// Breakfast slot
    pub breakfast: MealSuggestion,
    /// Lunch slot
    pub lunch: MealSuggestion,
    /// Dinner slot
    pub dinner: MealSuggestion,
    /// Snack slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snack: Option<MealSuggestion>,
    /// Sum of the meals' nutrition
    pub total_nutrition: NutritionFacts,
}

impl DailyMealPlan {
    /// Build a day and compute its total from the meals
    #[must_use]
    pub fn new(
        day: u32,
        breakfast: MealSuggestion,
        lunch: MealSuggestion,
        dinner: MealSuggestion,
        snack: Option<MealSuggestion>,
    ) -> Self {
        let total_nutrition = [Some(&breakfast), Some(&lunch), Some(&dinner), snack.as_ref()]
            .into_iter()
            .flatten()
            .map(|meal| meal.total_nutrition)
            .sum();
        Self {
            day,
            breakfast,
            lunch,
            dinner,
            snack,
            total_nutrition,
        }
    }

    /// Meals of the day in slot order
    pub fn meals(&self) -> impl Iterator<Item = &MealSuggestion> {
        [
            Some(&self.breakfast),
            Some(&self.lunch),
            Some(&self.dinner),
            self.snack.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Averages across the days of a plan, each rounded to the nearest integer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Number of days in the plan
    pub total_days: u32,
    /// Mean daily calories
    pub avg_daily_calories: f64,
    /// Mean daily protein grams
    pub avg_daily_protein: f64,
    /// Mean daily fat grams
    pub avg_daily_fat: f64,
    /// Mean daily carbohydrate grams
    pub avg_daily_carbs: f64,
}

impl PlanSummary {
    /// Summarize a sequence of days
    #[must_use]
    pub fn from_days(days: &[DailyMealPlan]) -> Self {
        let total_days = u32::try_from(days.len()).unwrap_or(u32::MAX);
        let totals: NutritionFacts = days.iter().map(|day| &day.total_nutrition).sum();
        let divisor = f64::from(total_days.max(1));
        Self {
            total_days,
            avg_daily_calories: (totals.calories / divisor).round(),
            avg_daily_protein: (totals.protein / divisor).round(),
            avg_daily_fat: (totals.fat / divisor).round(),
            avg_daily_carbs: (totals.carbohydrates / divisor).round(),
        }
    }
}

/// A multi-day plan plus its summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    /// Days in order
    pub days: Vec<DailyMealPlan>,
    /// Averages across days
    pub summary: PlanSummary,
}

impl MealPlan {
    /// Wrap days and compute the summary
    #[must_use]
    pub fn new(days: Vec<DailyMealPlan>) -> Self {
        let summary = PlanSummary::from_days(&days);
        Self { days, summary }
    }
}
