// ABOUTME: Registered menu records plus the registration, partial-update, and query shapes
// ABOUTME: RegisteredMenu is the persisted unit of the menu store, serialized in camelCase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::menu_store::VEGETARIAN_TAGS;
use crate::errors::{AppError, AppResult};
use crate::models::food::{MealType, NutritionFacts};

/// A user-authored recipe held by the menu store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredMenu {
    /// Generated identifier, never reused
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Ingredient lines in the order the author gave them
    pub ingredients: Vec<String>,
    /// Instruction steps in order
    pub instructions: Vec<String>,
    /// Meal slot this recipe is meant for
    pub meal_type: MealType,
    /// Nutrition totals for the whole recipe
    pub nutrition: NutritionFacts,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Number of servings the recipe yields
    pub servings: u32,
    /// Free-form tags (e.g. "vegetarian", "quick")
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl RegisteredMenu {
    /// Build a stored record from a validated registration
    #[must_use]
    pub fn from_registration(id: String, registration: MenuRegistration, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: registration.name,
            description: registration.description,
            ingredients: registration.ingredients,
            instructions: registration.instructions,
            meal_type: registration.meal_type,
            nutrition: registration.nutrition,
            prep_time: registration.prep_time,
            servings: registration.servings,
            tags: registration.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Protein-to-fat ratio of the recipe's nutrition totals
    #[must_use]
    pub fn protein_to_fat_ratio(&self) -> f64 {
        self.nutrition.protein_to_fat_ratio()
    }

    /// Exact, case-insensitive tag match
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own.eq_ignore_ascii_case(tag))
    }

    /// Tagged "vegetarian" or "vegan"
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        VEGETARIAN_TAGS.iter().any(|tag| self.has_tag(tag))
    }

    /// Case-insensitive substring match over name, description, ingredients, and tags
    #[must_use]
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .ingredients
                .iter()
                .any(|line| line.to_lowercase().contains(&needle))
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Whether any ingredient line contains any of the excluded substrings
    #[must_use]
    pub fn contains_any_ingredient(&self, excluded: &[String]) -> bool {
        excluded.iter().any(|term| {
            let term = term.to_lowercase();
            self.ingredients
                .iter()
                .any(|line| line.to_lowercase().contains(&term))
        })
    }

    /// Merge the supplied fields of an update into this record
    ///
    /// Does not touch `id`, `created_at`, or `updated_at`.
    pub fn apply(&mut self, update: MenuUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(ingredients) = update.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = update.instructions {
            self.instructions = instructions;
        }
        if let Some(meal_type) = update.meal_type {
            self.meal_type = meal_type;
        }
        if let Some(nutrition) = update.nutrition {
            self.nutrition = nutrition;
        }
        if let Some(prep_time) = update.prep_time {
            self.prep_time = prep_time;
        }
        if let Some(servings) = update.servings {
            self.servings = servings;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }
}

/// Fields supplied when registering a new recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRegistration {
    /// Recipe name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Meal slot
    pub meal_type: MealType,
    /// Nutrition totals
    pub nutrition: NutritionFacts,
    /// Preparation time in minutes (at least 1)
    pub prep_time: u32,
    /// Servings (at least 1)
    pub servings: u32,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MenuRegistration {
    /// Check name, ranges, and nutrition signs
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("name must not be empty"));
        }
        validate_prep_time(self.prep_time)?;
        validate_servings(self.servings)?;
        validate_nutrition(&self.nutrition)
    }
}

/// Partial update: `None` keeps the stored value, `Some` overwrites it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// Replacement ingredient list
    pub ingredients: Option<Vec<String>>,
    /// Replacement instruction list
    pub instructions: Option<Vec<String>>,
    /// New meal slot
    pub meal_type: Option<MealType>,
    /// Replacement nutrition totals
    pub nutrition: Option<NutritionFacts>,
    /// New preparation time
    pub prep_time: Option<u32>,
    /// New serving count
    pub servings: Option<u32>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

impl MenuUpdate {
    /// True when no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.meal_type.is_none()
            && self.nutrition.is_none()
            && self.prep_time.is_none()
            && self.servings.is_none()
            && self.tags.is_none()
    }

    /// Validate only the supplied fields
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_input("name must not be empty"));
            }
        }
        if let Some(prep_time) = self.prep_time {
            validate_prep_time(prep_time)?;
        }
        if let Some(servings) = self.servings {
            validate_servings(servings)?;
        }
        if let Some(nutrition) = &self.nutrition {
            validate_nutrition(nutrition)?;
        }
        Ok(())
    }
}

/// Conjunctive listing filters; every supplied filter narrows the result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuListFilter {
    /// Keep only this meal slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    /// Keep only menus carrying this tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Keep only menus whose text contains this substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl MenuListFilter {
    /// Whether a menu passes every supplied filter
    #[must_use]
    pub fn matches(&self, menu: &RegisteredMenu) -> bool {
        self.meal_type.is_none_or(|meal_type| menu.meal_type == meal_type)
            && self.tag.as_deref().is_none_or(|tag| menu.has_tag(tag))
            && self
                .search
                .as_deref()
                .is_none_or(|query| menu.matches_text(query))
    }
}

/// Criteria for ranking registered menus; all supplied criteria apply together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSuggestionCriteria {
    /// Required meal slot
    pub meal_type: Option<MealType>,
    /// Upper bound on calories
    pub max_calories: Option<f64>,
    /// Lower bound on protein grams
    pub min_protein: Option<f64>,
    /// Upper bound on fat grams
    pub max_fat: Option<f64>,
    /// Menus must carry at least one of these tags (empty means no constraint)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ids never returned
    #[serde(default)]
    pub exclude_ids: Vec<String>,
    /// Require a "vegetarian" or "vegan" tag
    #[serde(default)]
    pub vegetarian: bool,
}

impl MenuSuggestionCriteria {
    /// Whether a menu satisfies every supplied criterion
    #[must_use]
    pub fn matches(&self, menu: &RegisteredMenu) -> bool {
        self.meal_type.is_none_or(|meal_type| menu.meal_type == meal_type)
            && self
                .max_calories
                .is_none_or(|max| menu.nutrition.calories <= max)
            && self
                .min_protein
                .is_none_or(|min| menu.nutrition.protein >= min)
            && self.max_fat.is_none_or(|max| menu.nutrition.fat <= max)
            && (self.tags.is_empty() || self.tags.iter().any(|tag| menu.has_tag(tag)))
            && !self.exclude_ids.iter().any(|id| *id == menu.id)
            && (!self.vegetarian || menu.is_vegetarian())
    }
}

fn validate_prep_time(prep_time: u32) -> AppResult<()> {
    if prep_time < 1 {
        return Err(AppError::out_of_range("prepTime must be at least 1 minute"));
    }
    Ok(())
}

fn validate_servings(servings: u32) -> AppResult<()> {
    if servings < 1 {
        return Err(AppError::out_of_range("servings must be at least 1"));
    }
    Ok(())
}

fn validate_nutrition(nutrition: &NutritionFacts) -> AppResult<()> {
    nutrition.first_invalid_field().map_or(Ok(()), |field| {
        Err(AppError::out_of_range(format!(
            "nutrition.{field} must be a non-negative number"
        )))
    })
}
