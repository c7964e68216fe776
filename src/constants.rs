// ABOUTME: Application constants grouped by domain (protocol, tool names, nutrition, limits)
// ABOUTME: Single home for the fixed numbers the meal composer and plan assembler rely on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than scattered through
//! the implementation modules.

/// Service identity used in logs and the MCP `initialize` response
pub mod service_names {
    /// Server name advertised to MCP clients
    pub const MEAL_PLANNER_MCP_SERVER: &str = "meal-planner-mcp-server";
}

/// MCP protocol constants
pub mod protocol {
    /// Protocol revision this server speaks
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// Protocol revisions accepted from clients during `initialize`
    pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

    /// Instructions returned to clients in the `initialize` response
    pub const SERVER_INSTRUCTIONS: &str = "Low-fat, high-protein meal planner. Use suggest_meal for a single meal, \
        create_meal_plan for multi-day plans, and the *_menu tools to manage your own recipes.";
}

/// Tool names exposed over MCP
pub mod tools {
    /// Compose a single meal
    pub const SUGGEST_MEAL: &str = "suggest_meal";
    /// Look up one food in the nutrition table
    pub const GET_NUTRITION_INFO: &str = "get_nutrition_info";
    /// Search or filter the nutrition table
    pub const SEARCH_FOODS: &str = "search_foods";
    /// Build a multi-day plan from generated meals
    pub const CREATE_MEAL_PLAN: &str = "create_meal_plan";
    /// Register a user recipe
    pub const REGISTER_MENU: &str = "register_menu";
    /// Fetch one registered recipe
    pub const GET_MENU: &str = "get_menu";
    /// List registered recipes
    pub const LIST_MENUS: &str = "list_menus";
    /// Partially update a registered recipe
    pub const UPDATE_MENU: &str = "update_menu";
    /// Delete a registered recipe
    pub const DELETE_MENU: &str = "delete_menu";
    /// Rank registered recipes against nutrition criteria
    pub const SUGGEST_FROM_REGISTERED_MENUS: &str = "suggest_from_registered_menus";
    /// Build a multi-day plan preferring registered recipes
    pub const CREATE_MEAL_PLAN_FROM_MENUS: &str = "create_meal_plan_from_menus";
}

/// Nutrition heuristics used by the meal composer
pub mod nutrition {
    /// Fat floor (grams) used in protein-to-fat ratios
    pub const FAT_FLOOR_G: f64 = 0.1;
    /// Share of a meal's calories allocated to the protein item
    pub const PROTEIN_CALORIE_SHARE: f64 = 0.4;
    /// Calories reserved for the two vegetables
    pub const VEGETABLE_CALORIE_ALLOWANCE: f64 = 50.0;
    /// Remaining calories above which a grain is added
    pub const GRAIN_CALORIE_THRESHOLD: f64 = 100.0;
    /// Serving multiplier for the first vegetable (100g)
    pub const PRIMARY_VEGETABLE_SERVING: f64 = 1.0;
    /// Serving multiplier for the second vegetable (50g)
    pub const SECONDARY_VEGETABLE_SERVING: f64 = 0.5;
    /// Serving multiplier for breakfast/snack fruit (50g)
    pub const FRUIT_SERVING: f64 = 0.5;
    /// Grams per nutrition-table serving
    pub const GRAMS_PER_SERVING: f64 = 100.0;
    /// Calorie ceiling multiplier when drawing registered menus for a slot
    pub const MENU_CALORIE_HEADROOM: f64 = 1.2;
}

/// Daily calorie split across meal slots
pub mod meal_split {
    /// Breakfast share of daily calories
    pub const BREAKFAST: f64 = 0.25;
    /// Lunch share of daily calories
    pub const LUNCH: f64 = 0.35;
    /// Dinner share of daily calories
    pub const DINNER: f64 = 0.35;
    /// Snack share of daily calories
    pub const SNACK: f64 = 0.05;
}

/// Input ranges enforced before requests reach the core
pub mod limits {
    /// Minimum target calories for a single meal
    pub const MEAL_CALORIES_MIN: f64 = 100.0;
    /// Maximum target calories for a single meal
    pub const MEAL_CALORIES_MAX: f64 = 1500.0;
    /// Minimum plan length in days
    pub const PLAN_DAYS_MIN: u32 = 1;
    /// Maximum plan length in days
    pub const PLAN_DAYS_MAX: u32 = 14;
    /// Minimum daily calories for a plan
    pub const DAILY_CALORIES_MIN: f64 = 1200.0;
    /// Maximum daily calories for a plan
    pub const DAILY_CALORIES_MAX: f64 = 3000.0;
    /// Minimum `maxCalories` accepted by registered-menu suggestions
    pub const SUGGEST_MAX_CALORIES_MIN: f64 = 50.0;
    /// Default number of registered-menu suggestions returned
    pub const SUGGEST_LIMIT_DEFAULT: usize = 5;
    /// Minimum number of registered-menu suggestions returned
    pub const SUGGEST_LIMIT_MIN: usize = 1;
    /// Maximum number of registered-menu suggestions returned
    pub const SUGGEST_LIMIT_MAX: usize = 20;
}

/// Menu store file layout
pub mod menu_store {
    /// Directory (relative to the install root) holding the store
    pub const DATA_DIR: &str = "data";
    /// Store file name
    pub const FILE_NAME: &str = "menus.json";
    /// Application directory under the platform data dir (fallback location)
    pub const APP_DIR: &str = "meal-planner";
    /// Prefix for generated menu ids
    pub const ID_PREFIX: &str = "menu_";
    /// Tags that qualify a menu as vegetarian
    pub const VEGETARIAN_TAGS: &[&str] = &["vegetarian", "vegan"];
}
