// ABOUTME: Assembles multi-day meal plans from composed meals or registered menus
// ABOUTME: Splits daily calories across four slots and summarizes per-day totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan Assembler
//!
//! Each day gets breakfast, lunch, dinner, and a snack. Slot targets are the
//! configured share of the daily calories, rounded per slot. When registered
//! menus are in play a slot first tries a random matching menu not yet used
//! that day and falls back to the composer.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::MealPlannerConfig;
use crate::database::MenuStore;
use crate::intelligence::food_table::FoodTable;
use crate::intelligence::meal_composer::{CompositionError, MealComposer, MealRequest};
use crate::models::{
    DailyMealPlan, MealPlan, MealSuggestion, MealType, MenuSuggestionCriteria, RegisteredMenu,
};

/// Inputs for a multi-day plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Number of days
    pub days: u32,
    /// Daily calorie target
    pub daily_calories: f64,
    /// Restrict to vegetarian foods and vegetarian-tagged menus
    pub vegetarian: bool,
    /// Case-insensitive substrings excluded from foods and menu ingredients
    pub exclude_ingredients: Vec<String>,
}

/// Builds plans over a food table and tunables
#[derive(Debug, Clone, Copy)]
pub struct PlanAssembler<'a> {
    composer: MealComposer<'a>,
    config: &'a MealPlannerConfig,
}

impl<'a> PlanAssembler<'a> {
    /// Create an assembler
    #[must_use]
    pub const fn new(foods: &'a FoodTable, config: &'a MealPlannerConfig) -> Self {
        Self {
            composer: MealComposer::new(foods, config),
            config,
        }
    }

    /// Plan made entirely of composed meals
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] when a slot cannot be composed
    pub fn build_plan<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
    ) -> Result<MealPlan, CompositionError> {
        self.assemble(request, None, rng)
    }

    /// Plan preferring registered menus, falling back to composed meals per slot
    ///
    /// Behaves exactly like [`Self::build_plan`] when `menus` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] when a fallback slot cannot be composed
    pub fn build_plan_from_menus<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        menus: Option<&MenuStore>,
        rng: &mut R,
    ) -> Result<MealPlan, CompositionError> {
        self.assemble(request, menus, rng)
    }

    fn assemble<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        menus: Option<&MenuStore>,
        rng: &mut R,
    ) -> Result<MealPlan, CompositionError> {
        let mut days = Vec::with_capacity(request.days as usize);
        for day in 1..=request.days {
            let mut used_menu_ids: Vec<String> = Vec::new();
            let mut slot = |meal_type: MealType| {
                self.fill_slot(request, meal_type, menus, &mut used_menu_ids, rng)
            };
            let breakfast = slot(MealType::Breakfast)?;
            let lunch = slot(MealType::Lunch)?;
            let dinner = slot(MealType::Dinner)?;
            let snack = slot(MealType::Snack)?;
            days.push(DailyMealPlan::new(day, breakfast, lunch, dinner, Some(snack)));
        }
        Ok(MealPlan::new(days))
    }

    fn fill_slot<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        meal_type: MealType,
        menus: Option<&MenuStore>,
        used_menu_ids: &mut Vec<String>,
        rng: &mut R,
    ) -> Result<MealSuggestion, CompositionError> {
        let slot_calories = self.config.slot_calories(request.daily_calories, meal_type);

        if let Some(store) = menus {
            if let Some(menu) =
                self.pick_menu(store, request, meal_type, slot_calories, used_menu_ids, rng)
            {
                debug!(menu_id = %menu.id, %meal_type, "Using registered menu for slot");
                used_menu_ids.push(menu.id.clone());
                return Ok(MealSuggestion::from(menu));
            }
        }

        let meal_request = MealRequest::new(meal_type)
            .with_calories(slot_calories)
            .excluding(request.exclude_ingredients.clone())
            .vegetarian(request.vegetarian);
        self.composer.compose(&meal_request, rng)
    }

    fn pick_menu<'s, R: Rng + ?Sized>(
        &self,
        store: &'s MenuStore,
        request: &PlanRequest,
        meal_type: MealType,
        slot_calories: f64,
        used_menu_ids: &[String],
        rng: &mut R,
    ) -> Option<&'s RegisteredMenu> {
        let criteria = MenuSuggestionCriteria {
            meal_type: Some(meal_type),
            max_calories: Some((slot_calories * self.config.menu_calorie_headroom).round()),
            vegetarian: request.vegetarian,
            exclude_ids: used_menu_ids.to_vec(),
            ..MenuSuggestionCriteria::default()
        };
        let candidates: Vec<&RegisteredMenu> = store
            .suggest(&criteria)
            .into_iter()
            .filter(|menu| !menu.contains_any_ingredient(&request.exclude_ingredients))
            .collect();
        candidates.choose(rng).copied()
    }
}
