// ABOUTME: Registered menu tools backed by the persistent menu store.
// ABOUTME: Implements register/get/list/update/delete, ranked suggestions, and menu-based plans.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Menu Tools
//!
//! CRUD over user recipes plus two planning tools that draw from them.
//! Every tool except `create_meal_plan_from_menus` needs a configured menu
//! store and reports it as unavailable otherwise; the plan tool falls back
//! to composed meals instead.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::constants::limits::{
    SUGGEST_LIMIT_DEFAULT, SUGGEST_LIMIT_MAX, SUGGEST_LIMIT_MIN, SUGGEST_MAX_CALORIES_MIN,
};
use crate::constants::tools::{
    CREATE_MEAL_PLAN_FROM_MENUS, DELETE_MENU, GET_MENU, LIST_MENUS, REGISTER_MENU,
    SUGGEST_FROM_REGISTERED_MENUS, UPDATE_MENU,
};
use crate::errors::AppResult;
use crate::intelligence::PlanAssembler;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::{
    MealSuggestion, MealType, MenuListFilter, MenuRegistration, MenuSuggestionCriteria, MenuUpdate,
};
use crate::tools::context::ToolExecutionContext;
use crate::tools::errors::ToolError;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::params::{
    at_least, decode, optional_bool, optional_f64, optional_meal_type, optional_str,
    plan_properties, plan_request, required_str, string_list, whole_within,
};

// ============================================================================
// Helper functions
// ============================================================================

fn meal_type_property(description: &str) -> PropertySchema {
    let values: Vec<&str> = MealType::ALL.into_iter().map(MealType::as_str).collect();
    PropertySchema::string(description).with_enum(&values)
}

fn nutrition_property() -> PropertySchema {
    const FIELDS: [(&str, &str); 6] = [
        ("calories", "Energy in kcal"),
        ("protein", "Protein in grams"),
        ("fat", "Fat in grams"),
        ("carbohydrates", "Carbohydrates in grams"),
        ("fiber", "Fiber in grams"),
        ("sodium", "Sodium in milligrams"),
    ];
    let fields: Vec<&str> = FIELDS.iter().map(|(name, _)| *name).collect();
    PropertySchema::object(
        "Nutrition per serving; every value must be zero or greater",
        FIELDS
            .iter()
            .map(|(name, description)| (*name, PropertySchema::number(description).with_minimum(0.0)))
            .collect(),
        &fields,
    )
}

/// Properties accepted by `register_menu`, all optional for `update_menu`
fn menu_properties() -> Vec<(&'static str, PropertySchema)> {
    vec![
        ("name", PropertySchema::string("Menu name")),
        ("description", PropertySchema::string("Short description")),
        (
            "ingredients",
            PropertySchema::string_array("Ingredient lines, e.g. \"150g chicken breast\""),
        ),
        ("instructions", PropertySchema::string_array("Preparation steps in order")),
        ("mealType", meal_type_property("Meal slot this menu is for")),
        ("nutrition", nutrition_property()),
        (
            "prepTime",
            PropertySchema::integer("Preparation time in minutes").with_minimum(1.0),
        ),
        ("servings", PropertySchema::integer("Number of servings").with_minimum(1.0)),
        ("tags", PropertySchema::string_array("Free-form tags such as \"vegetarian\"")),
    ]
}

/// Validate `mealType` case-insensitively and rewrite it in canonical form
fn normalize_meal_type(tool: &str, args: &mut Value) -> AppResult<Option<MealType>> {
    let meal_type = optional_meal_type(tool, args, "mealType")?;
    if let (Some(meal_type), Some(fields)) = (meal_type, args.as_object_mut()) {
        fields.insert("mealType".to_owned(), json!(meal_type.as_str()));
    }
    Ok(meal_type)
}

fn menu_not_found(id: &str) -> ToolResult {
    ToolResult::text(format!("Menu not found: {id}"))
}

fn id_schema(description: &str) -> JsonSchema {
    JsonSchema::object(vec![("id", PropertySchema::string(description))], &["id"])
}

// ============================================================================
// RegisterMenuTool
// ============================================================================

/// Persist a new user recipe.
pub struct RegisterMenuTool;

#[async_trait]
impl McpTool for RegisterMenuTool {
    fn name(&self) -> &'static str {
        REGISTER_MENU
    }

    fn description(&self) -> &'static str {
        "Register a custom menu (recipe) so it can be suggested and used in meal plans"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            menu_properties(),
            &["name", "mealType", "nutrition", "prepTime", "servings"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, mut args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let store = ctx.menu_store(REGISTER_MENU)?;

        for field in ["name", "mealType", "nutrition", "prepTime", "servings"] {
            if args.get(field).is_none_or(Value::is_null) {
                return Err(ToolError::missing_parameter(REGISTER_MENU, field).into());
            }
        }
        normalize_meal_type(REGISTER_MENU, &mut args)?;
        let registration: MenuRegistration = decode(REGISTER_MENU, args)?;

        let menu = store.lock().await.register(registration)?;
        info!(menu_id = %menu.id, name = %menu.name, "Registered menu");
        Ok(ToolResult::from_serializable(&menu)?)
    }
}

// ============================================================================
// GetMenuTool
// ============================================================================

/// Fetch one registered recipe by id.
pub struct GetMenuTool;

#[async_trait]
impl McpTool for GetMenuTool {
    fn name(&self) -> &'static str {
        GET_MENU
    }

    fn description(&self) -> &'static str {
        "Get a registered menu by id"
    }

    fn input_schema(&self) -> JsonSchema {
        id_schema("Id of the menu to fetch")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let store = ctx.menu_store(GET_MENU)?;
        let id = required_str(GET_MENU, &args, "id")?;

        let store = store.lock().await;
        match store.get(id) {
            Some(menu) => Ok(ToolResult::from_serializable(menu)?),
            None => Ok(menu_not_found(id)),
        }
    }
}

// ============================================================================
// ListMenusTool
// ============================================================================

/// List registered recipes, optionally filtered.
pub struct ListMenusTool;

#[async_trait]
impl McpTool for ListMenusTool {
    fn name(&self) -> &'static str {
        LIST_MENUS
    }

    fn description(&self) -> &'static str {
        "List registered menus; mealType, tag, and search filters combine"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("mealType", meal_type_property("Only menus for this meal slot")),
                ("tag", PropertySchema::string("Only menus carrying this tag")),
                (
                    "search",
                    PropertySchema::string(
                        "Case-insensitive text matched against name, description, ingredients, and tags",
                    ),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let store = ctx.menu_store(LIST_MENUS)?;
        let filter = MenuListFilter {
            meal_type: optional_meal_type(LIST_MENUS, &args, "mealType")?,
            tag: optional_str(LIST_MENUS, &args, "tag")?.map(str::to_owned),
            search: optional_str(LIST_MENUS, &args, "search")?.map(str::to_owned),
        };

        let store = store.lock().await;
        let menus = store.list(&filter);
        Ok(ToolResult::ok(json!({
            "count": menus.len(),
            "menus": menus,
            "appliedFilters": filter,
        })))
    }
}

// ============================================================================
// UpdateMenuTool
// ============================================================================

/// Overwrite the supplied fields of a registered recipe.
pub struct UpdateMenuTool;

#[async_trait]
impl McpTool for UpdateMenuTool {
    fn name(&self) -> &'static str {
        UPDATE_MENU
    }

    fn description(&self) -> &'static str {
        "Update a registered menu; only the supplied fields change"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = menu_properties();
        properties.insert(0, ("id", PropertySchema::string("Id of the menu to update")));
        JsonSchema::object(properties, &["id"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, mut args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let store = ctx.menu_store(UPDATE_MENU)?;
        let id = required_str(UPDATE_MENU, &args, "id")?.to_owned();
        normalize_meal_type(UPDATE_MENU, &mut args)?;
        let update: MenuUpdate = decode(UPDATE_MENU, args)?;

        let updated = store.lock().await.update(&id, update)?;
        match updated {
            Some(menu) => {
                info!(menu_id = %menu.id, "Updated menu");
                Ok(ToolResult::from_serializable(&menu)?)
            }
            None => Ok(menu_not_found(&id)),
        }
    }
}

// ============================================================================
// DeleteMenuTool
// ============================================================================

/// Remove a registered recipe.
pub struct DeleteMenuTool;

#[async_trait]
impl McpTool for DeleteMenuTool {
    fn name(&self) -> &'static str {
        DELETE_MENU
    }

    fn description(&self) -> &'static str {
        "Delete a registered menu by id"
    }

    fn input_schema(&self) -> JsonSchema {
        id_schema("Id of the menu to delete")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let store = ctx.menu_store(DELETE_MENU)?;
        let id = required_str(DELETE_MENU, &args, "id")?;

        if store.lock().await.delete(id)? {
            info!(menu_id = %id, "Deleted menu");
            Ok(ToolResult::text(format!("Menu {id} deleted successfully")))
        } else {
            Ok(menu_not_found(id))
        }
    }
}

// ============================================================================
// SuggestFromRegisteredMenusTool
// ============================================================================

/// Rank registered recipes by protein-to-fat ratio under nutrition limits.
pub struct SuggestFromRegisteredMenusTool;

#[async_trait]
impl McpTool for SuggestFromRegisteredMenusTool {
    fn name(&self) -> &'static str {
        SUGGEST_FROM_REGISTERED_MENUS
    }

    fn description(&self) -> &'static str {
        "Suggest registered menus matching nutrition limits, best protein-to-fat ratio first"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("mealType", meal_type_property("Only menus for this meal slot")),
                (
                    "maxCalories",
                    PropertySchema::number("Maximum calories").with_minimum(SUGGEST_MAX_CALORIES_MIN),
                ),
                (
                    "minProtein",
                    PropertySchema::number("Minimum protein in grams").with_minimum(0.0),
                ),
                ("maxFat", PropertySchema::number("Maximum fat in grams").with_minimum(0.0)),
                (
                    "tags",
                    PropertySchema::string_array("Menus must carry at least one of these tags"),
                ),
                (
                    "vegetarian",
                    PropertySchema::boolean("Only menus tagged vegetarian or vegan"),
                ),
                (
                    "limit",
                    PropertySchema::integer("Maximum number of suggestions")
                        .with_range(SUGGEST_LIMIT_MIN as f64, SUGGEST_LIMIT_MAX as f64)
                        .with_default(json!(SUGGEST_LIMIT_DEFAULT)),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MENUS | ToolCapabilities::REQUIRES_MENU_STORE
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        const TOOL: &str = SUGGEST_FROM_REGISTERED_MENUS;
        let store = ctx.menu_store(TOOL)?;

        let criteria = MenuSuggestionCriteria {
            meal_type: optional_meal_type(TOOL, &args, "mealType")?,
            max_calories: optional_f64(TOOL, &args, "maxCalories")?
                .map(|value| at_least("maxCalories", value, SUGGEST_MAX_CALORIES_MIN))
                .transpose()?,
            min_protein: optional_f64(TOOL, &args, "minProtein")?
                .map(|value| at_least("minProtein", value, 0.0))
                .transpose()?,
            max_fat: optional_f64(TOOL, &args, "maxFat")?
                .map(|value| at_least("maxFat", value, 0.0))
                .transpose()?,
            tags: string_list(TOOL, &args, "tags")?,
            exclude_ids: Vec::new(),
            vegetarian: optional_bool(TOOL, &args, "vegetarian")?.unwrap_or(false),
        };
        let limit = optional_f64(TOOL, &args, "limit")?
            .map(|value| {
                whole_within(
                    TOOL,
                    "limit",
                    value,
                    SUGGEST_LIMIT_MIN as u32,
                    SUGGEST_LIMIT_MAX as u32,
                )
            })
            .transpose()?
            .map_or(SUGGEST_LIMIT_DEFAULT, |limit| limit as usize);

        let store = store.lock().await;
        let matches = store.suggest(&criteria);
        let total_available = matches.len();
        let suggestions: Vec<MealSuggestion> = matches
            .into_iter()
            .take(limit)
            .map(MealSuggestion::from)
            .collect();

        debug!(total_available, returned = suggestions.len(), "Ranked registered menus");
        Ok(ToolResult::ok(json!({
            "suggestions": suggestions,
            "totalAvailable": total_available,
        })))
    }
}

// ============================================================================
// CreateMealPlanFromMenusTool
// ============================================================================

/// Multi-day plan preferring registered recipes.
pub struct CreateMealPlanFromMenusTool;

#[async_trait]
impl McpTool for CreateMealPlanFromMenusTool {
    fn name(&self) -> &'static str {
        CREATE_MEAL_PLAN_FROM_MENUS
    }

    fn description(&self) -> &'static str {
        "Create a multi-day meal plan using registered menus where they fit, generated meals otherwise"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = plan_properties();
        properties.push((
            "useRegisteredMenus",
            PropertySchema::boolean("Draw slots from registered menus when possible")
                .with_default(json!(true)),
        ));
        JsonSchema::object(properties, &["days", "dailyCalories"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
            | ToolCapabilities::MEAL_PLANNING
            | ToolCapabilities::MENUS
            | ToolCapabilities::RANDOMIZED
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        const TOOL: &str = CREATE_MEAL_PLAN_FROM_MENUS;
        let request = plan_request(TOOL, &args)?;
        let use_menus = optional_bool(TOOL, &args, "useRegisteredMenus")?.unwrap_or(true);

        let resources = &ctx.resources;
        let assembler = PlanAssembler::new(&resources.foods, &resources.planner);
        let plan = match resources.menu_store.as_ref().filter(|_| use_menus) {
            Some(store) => {
                let store = store.lock().await;
                let mut rng = resources.rng.lock().await;
                assembler.build_plan_from_menus(&request, Some(&*store), &mut *rng)?
            }
            None => {
                debug!("Building plan without registered menus");
                let mut rng = resources.rng.lock().await;
                assembler.build_plan(&request, &mut *rng)?
            }
        };

        Ok(ToolResult::from_serializable(&plan)?)
    }
}

/// Create all menu tools for registration
#[must_use]
pub fn create_menu_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(RegisterMenuTool),
        Box::new(GetMenuTool),
        Box::new(ListMenusTool),
        Box::new(UpdateMenuTool),
        Box::new(DeleteMenuTool),
        Box::new(SuggestFromRegisteredMenusTool),
        Box::new(CreateMealPlanFromMenusTool),
    ]
}
