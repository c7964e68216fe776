// ABOUTME: Meal composition and nutrition lookup tools.
// ABOUTME: Implements suggest_meal, get_nutrition_info, search_foods, create_meal_plan.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Tools
//!
//! - `SuggestMealTool` - compose one low-fat, high-protein meal
//! - `GetNutritionInfoTool` - case-insensitive nutrition table lookup
//! - `SearchFoodsTool` - filter the nutrition table by name, category, diet
//! - `CreateMealPlanTool` - multi-day plan of composed meals
//!
//! All four work without a menu store.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::constants::limits::{MEAL_CALORIES_MAX, MEAL_CALORIES_MIN};
use crate::constants::tools::{CREATE_MEAL_PLAN, GET_NUTRITION_INFO, SEARCH_FOODS, SUGGEST_MEAL};
use crate::errors::AppResult;
use crate::intelligence::{MealComposer, MealRequest, PlanAssembler};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::{FoodCategory, FoodItem, MealType};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::params::{
    optional_bool, optional_f64, optional_str, plan_properties, plan_request, required_str,
    string_list, within,
};

fn meal_type_values() -> Vec<&'static str> {
    MealType::ALL.into_iter().map(MealType::as_str).collect()
}

// ============================================================================
// SuggestMealTool
// ============================================================================

/// Compose one meal for a slot.
pub struct SuggestMealTool;

#[async_trait]
impl McpTool for SuggestMealTool {
    fn name(&self) -> &'static str {
        SUGGEST_MEAL
    }

    fn description(&self) -> &'static str {
        "Suggest a low-fat, high-protein meal based on preferences and dietary requirements"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "mealType",
                    PropertySchema::string("Type of meal to suggest")
                        .with_enum(&meal_type_values()),
                ),
                (
                    "calories",
                    PropertySchema::number("Target calories for the meal (optional)")
                        .with_range(MEAL_CALORIES_MIN, MEAL_CALORIES_MAX),
                ),
                (
                    "excludeIngredients",
                    PropertySchema::string_array(
                        "Ingredients to exclude from suggestions (optional)",
                    ),
                ),
                (
                    "vegetarian",
                    PropertySchema::boolean(
                        "Whether to include only vegetarian options (optional)",
                    )
                    .with_default(json!(false)),
                ),
            ],
            &["mealType"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MEAL_PLANNING | ToolCapabilities::RANDOMIZED
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let meal_type: MealType = required_str(SUGGEST_MEAL, &args, "mealType")?.parse()?;

        let mut request = MealRequest::new(meal_type)
            .excluding(string_list(SUGGEST_MEAL, &args, "excludeIngredients")?)
            .vegetarian(optional_bool(SUGGEST_MEAL, &args, "vegetarian")?.unwrap_or(false));
        if let Some(calories) = optional_f64(SUGGEST_MEAL, &args, "calories")? {
            request = request.with_calories(within(
                "calories",
                calories,
                MEAL_CALORIES_MIN,
                MEAL_CALORIES_MAX,
            )?);
        }

        let resources = &ctx.resources;
        let composer = MealComposer::new(&resources.foods, &resources.planner);
        let meal = {
            let mut rng = resources.rng.lock().await;
            composer.compose(&request, &mut *rng)?
        };

        debug!(%meal_type, calories = meal.total_nutrition.calories, "Composed meal");
        Ok(ToolResult::from_serializable(&meal)?)
    }
}

// ============================================================================
// GetNutritionInfoTool
// ============================================================================

/// Look up one food by name.
pub struct GetNutritionInfoTool;

#[async_trait]
impl McpTool for GetNutritionInfoTool {
    fn name(&self) -> &'static str {
        GET_NUTRITION_INFO
    }

    fn description(&self) -> &'static str {
        "Get detailed nutritional information for a specific food item"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "foodItem",
                PropertySchema::string("Name of the food item to get nutrition information for"),
            )],
            &["foodItem"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let food_item = required_str(GET_NUTRITION_INFO, &args, "foodItem")?;

        match ctx.resources.foods.lookup(food_item) {
            Some(food) => Ok(ToolResult::from_serializable(food)?),
            None => Ok(ToolResult::text(format!(
                "Nutrition information not found for: {food_item}"
            ))),
        }
    }
}

// ============================================================================
// SearchFoodsTool
// ============================================================================

/// Filter the nutrition table.
pub struct SearchFoodsTool;

#[async_trait]
impl McpTool for SearchFoodsTool {
    fn name(&self) -> &'static str {
        SEARCH_FOODS
    }

    fn description(&self) -> &'static str {
        "Search the nutrition table by name substring, category, and vegetarian suitability"
    }

    fn input_schema(&self) -> JsonSchema {
        let categories: Vec<&str> = FoodCategory::ALL.into_iter().map(FoodCategory::as_str).collect();
        JsonSchema::object(
            vec![
                (
                    "query",
                    PropertySchema::string("Case-insensitive substring of the food name"),
                ),
                (
                    "category",
                    PropertySchema::string("Restrict to one food category").with_enum(&categories),
                ),
                (
                    "vegetarianOnly",
                    PropertySchema::boolean("Only return vegetarian foods")
                        .with_default(json!(false)),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query = optional_str(SEARCH_FOODS, &args, "query")?.map(str::trim);
        let category = optional_str(SEARCH_FOODS, &args, "category")?
            .map(str::parse::<FoodCategory>)
            .transpose()?;
        let vegetarian_only = optional_bool(SEARCH_FOODS, &args, "vegetarianOnly")?.unwrap_or(false);

        let foods: Vec<&FoodItem> = ctx.resources.foods.filter(|food| {
            query.is_none_or(|needle| food.name_contains(needle))
                && category.is_none_or(|wanted| food.category == wanted)
                && (!vegetarian_only || food.is_vegetarian)
        });

        Ok(ToolResult::ok(json!({
            "count": foods.len(),
            "foods": foods,
        })))
    }
}

// ============================================================================
// CreateMealPlanTool
// ============================================================================

/// Multi-day plan made of composed meals.
pub struct CreateMealPlanTool;

#[async_trait]
impl McpTool for CreateMealPlanTool {
    fn name(&self) -> &'static str {
        CREATE_MEAL_PLAN
    }

    fn description(&self) -> &'static str {
        "Create a multi-day low-fat, high-protein meal plan"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(plan_properties(), &["days", "dailyCalories"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MEAL_PLANNING | ToolCapabilities::RANDOMIZED
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let request = plan_request(CREATE_MEAL_PLAN, &args)?;

        let resources = &ctx.resources;
        let assembler = PlanAssembler::new(&resources.foods, &resources.planner);
        let plan = {
            let mut rng = resources.rng.lock().await;
            assembler.build_plan(&request, &mut *rng)?
        };

        debug!(
            days = plan.summary.total_days,
            avg_calories = plan.summary.avg_daily_calories,
            "Built meal plan"
        );
        Ok(ToolResult::from_serializable(&plan)?)
    }
}

/// Create all meal tools for registration
#[must_use]
pub fn create_meal_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(SuggestMealTool),
        Box::new(GetNutritionInfoTool),
        Box::new(SearchFoodsTool),
        Box::new(CreateMealPlanTool),
    ]
}
