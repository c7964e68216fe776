// ABOUTME: Composes a single low-fat, high-protein meal from the nutrition table
// ABOUTME: Picks the leanest protein, two random vegetables, an optional grain and fruit, then scales servings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Composer
//!
//! Composition steps:
//!
//! 1. Candidate pool: vegetarian foods when requested, minus any food whose
//!    name contains an excluded substring.
//! 2. Protein: the candidate with the best protein-to-fat ratio (first in
//!    table order on ties), scaled to a fixed share of the target calories.
//! 3. Two distinct random vegetables at fixed servings.
//! 4. A random grain sized to the leftover calories when the leftover exceeds
//!    the grain threshold.
//! 5. A random fruit half-serving for breakfast and snacks.
//!
//! Nutrition is summed from the scaled contributions and each field is
//! rounded after summation.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::config::MealPlannerConfig;
use crate::constants::nutrition::GRAMS_PER_SERVING;
use crate::errors::{AppError, ErrorCode};
use crate::intelligence::food_table::FoodTable;
use crate::models::{FoodCategory, FoodItem, MealSuggestion, MealType, NutritionFacts};

/// Reasons a meal cannot be composed from the filtered pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// Exclusions or the vegetarian filter removed every protein
    #[error("No eligible protein remains after applying exclusions and dietary filters")]
    NoEligibleProtein,
    /// Fewer than two vegetables remain
    #[error("At least two eligible vegetables are required, but only {available} remain after applying exclusions and dietary filters")]
    NotEnoughVegetables {
        /// Vegetables left in the pool
        available: usize,
    },
}

impl From<CompositionError> for AppError {
    fn from(error: CompositionError) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, error.to_string()).with_source(error)
    }
}

/// Inputs for composing one meal
#[derive(Debug, Clone, PartialEq)]
pub struct MealRequest {
    /// Slot the meal is for
    pub meal_type: MealType,
    /// Calorie target; the slot default when absent
    pub target_calories: Option<f64>,
    /// Case-insensitive substrings removing foods from the pool
    pub exclude_ingredients: Vec<String>,
    /// Restrict the pool to vegetarian foods
    pub vegetarian: bool,
}

impl MealRequest {
    /// Request with default calories, no exclusions, not vegetarian
    #[must_use]
    pub const fn new(meal_type: MealType) -> Self {
        Self {
            meal_type,
            target_calories: None,
            exclude_ingredients: Vec::new(),
            vegetarian: false,
        }
    }

    /// Set the calorie target
    #[must_use]
    pub const fn with_calories(mut self, calories: f64) -> Self {
        self.target_calories = Some(calories);
        self
    }

    /// Set excluded ingredient substrings
    #[must_use]
    pub fn excluding(mut self, exclude_ingredients: Vec<String>) -> Self {
        self.exclude_ingredients = exclude_ingredients;
        self
    }

    /// Set the vegetarian flag
    #[must_use]
    pub const fn vegetarian(mut self, vegetarian: bool) -> Self {
        self.vegetarian = vegetarian;
        self
    }

    /// Calorie target after applying the slot default
    #[must_use]
    pub fn effective_calories(&self) -> f64 {
        self.target_calories
            .unwrap_or_else(|| self.meal_type.default_calories())
    }

    /// Whether a food survives the dietary filter and exclusions
    #[must_use]
    pub fn admits(&self, food: &FoodItem) -> bool {
        (!self.vegetarian || food.is_vegetarian)
            && !self
                .exclude_ingredients
                .iter()
                .any(|excluded| food.name_contains(excluded))
    }
}

/// A chosen food and its serving multiplier
#[derive(Debug, Clone, Copy)]
struct Portion<'a> {
    food: &'a FoodItem,
    servings: f64,
}

impl Portion<'_> {
    fn ingredient_line(&self) -> String {
        let grams = (self.servings * GRAMS_PER_SERVING).round();
        format!("{grams}g {}", self.food.name)
    }

    fn nutrition(&self) -> NutritionFacts {
        self.food.nutrition().scaled(self.servings)
    }
}

/// Composes meals from a nutrition table
#[derive(Debug, Clone, Copy)]
pub struct MealComposer<'a> {
    foods: &'a FoodTable,
    config: &'a MealPlannerConfig,
}

impl<'a> MealComposer<'a> {
    /// Create a composer over a table and tunables
    #[must_use]
    pub const fn new(foods: &'a FoodTable, config: &'a MealPlannerConfig) -> Self {
        Self { foods, config }
    }

    /// Compose one meal
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] when the filtered pool has no protein or fewer than two vegetables
    pub fn compose<R: Rng + ?Sized>(
        &self,
        request: &MealRequest,
        rng: &mut R,
    ) -> Result<MealSuggestion, CompositionError> {
        let meal_type = request.meal_type;
        let target_calories = request.effective_calories();
        let pool = self.foods.filter(|food| request.admits(food));
        let in_category = |category: FoodCategory| -> Vec<&FoodItem> {
            pool.iter()
                .copied()
                .filter(|food| food.category == category)
                .collect()
        };

        let protein_food =
            best_protein(&in_category(FoodCategory::Protein)).ok_or(CompositionError::NoEligibleProtein)?;
        let protein_calories = target_calories * self.config.protein_calorie_share;
        let protein = Portion {
            food: protein_food,
            servings: servings_for(protein_calories, protein_food),
        };

        let vegetables = in_category(FoodCategory::Vegetable);
        let (first_vegetable, second_vegetable) = pick_two(&vegetables, rng).ok_or(
            CompositionError::NotEnoughVegetables {
                available: vegetables.len(),
            },
        )?;
        let vegetable_portions = [
            Portion {
                food: first_vegetable,
                servings: self.config.primary_vegetable_serving,
            },
            Portion {
                food: second_vegetable,
                servings: self.config.secondary_vegetable_serving,
            },
        ];

        let remaining_calories =
            target_calories - (protein_calories + self.config.vegetable_calorie_allowance);
        let grain = if remaining_calories > self.config.grain_calorie_threshold {
            in_category(FoodCategory::Grain)
                .choose(rng)
                .map(|&food| Portion {
                    food,
                    servings: servings_for(remaining_calories, food),
                })
        } else {
            None
        };

        let fruit = if meal_type.includes_fruit() {
            in_category(FoodCategory::Fruit)
                .choose(rng)
                .map(|&food| Portion {
                    food,
                    servings: self.config.fruit_serving,
                })
        } else {
            None
        };

        let portions: Vec<Portion<'_>> = [Some(protein)]
            .into_iter()
            .chain(vegetable_portions.map(Some))
            .chain([grain, fruit])
            .flatten()
            .collect();

        let total_nutrition = portions
            .iter()
            .map(Portion::nutrition)
            .sum::<NutritionFacts>()
            .rounded();

        Ok(MealSuggestion {
            name: meal_name(protein_food, first_vegetable, grain.map(|portion| portion.food)),
            description: format!(
                "Low-fat, high-protein {meal_type} optimized for muscle building and weight management"
            ),
            ingredients: portions.iter().map(Portion::ingredient_line).collect(),
            instructions: cooking_instructions(
                protein_food,
                grain.map(|portion| portion.food),
                fruit.map(|portion| portion.food),
            ),
            total_nutrition,
            prep_time: meal_type.prep_time_minutes(),
            servings: 1,
            meal_type,
        })
    }
}

/// Highest protein-to-fat ratio; the earliest food wins ties
fn best_protein<'a>(proteins: &[&'a FoodItem]) -> Option<&'a FoodItem> {
    proteins.iter().copied().fold(None, |best, candidate| match best {
        Some(current) if candidate.protein_to_fat_ratio() <= current.protein_to_fat_ratio() => {
            Some(current)
        }
        _ => Some(candidate),
    })
}

/// Two distinct foods in random order, uniformly over ordered pairs
fn pick_two<'a, R: Rng + ?Sized>(
    foods: &[&'a FoodItem],
    rng: &mut R,
) -> Option<(&'a FoodItem, &'a FoodItem)> {
    if foods.len() < 2 {
        return None;
    }
    let first = rng.gen_range(0..foods.len());
    let mut second = rng.gen_range(0..foods.len() - 1);
    if second >= first {
        second += 1;
    }
    Some((foods[first], foods[second]))
}

/// Serving multiplier that delivers `calories` of a food
fn servings_for(calories: f64, food: &FoodItem) -> f64 {
    if food.calories > 0.0 {
        calories / food.calories
    } else {
        1.0
    }
}

fn meal_name(protein: &FoodItem, vegetable: &FoodItem, grain: Option<&FoodItem>) -> String {
    let base = format!("{} with {}", protein.display_name(), vegetable.display_name());
    match grain {
        Some(grain) => format!("{base} and {}", grain.display_name()),
        None => base,
    }
}

fn cooking_instructions(
    protein: &FoodItem,
    grain: Option<&FoodItem>,
    fruit: Option<&FoodItem>,
) -> Vec<String> {
    let mut steps = vec!["Wash and prepare all vegetables".to_owned()];

    if let Some(grain) = grain {
        if grain.name.contains("rice") || grain.name.contains("quinoa") {
            steps.push(format!("Cook {} according to package directions", grain.name));
        } else if grain.name.contains("oatmeal") {
            steps.push("Prepare oatmeal with water or low-fat milk".to_owned());
        }
    }

    let protein_name = protein.name.as_str();
    let protein_step = if protein_name.contains("chicken") {
        "Season chicken breast and grill or bake at 375°F for 20-25 minutes".to_owned()
    } else if protein_name.contains("fish") || protein_name.contains("salmon") {
        "Season fish and bake at 400°F for 12-15 minutes or until flaky".to_owned()
    } else if protein_name.contains("egg") {
        "Whisk egg whites and cook in non-stick pan over medium heat".to_owned()
    } else if protein_name.contains("tofu") {
        "Press tofu, cube, and pan-fry until golden".to_owned()
    } else {
        format!("Prepare {protein_name} according to preference")
    };
    steps.push(protein_step);

    steps.push("Steam or lightly sauté vegetables until tender-crisp".to_owned());

    steps.push(grain.map_or_else(
        || format!("Plate {protein_name} with vegetables"),
        |grain| {
            format!(
                "Serve {protein_name} over {} with vegetables on the side",
                grain.name
            )
        },
    ));

    if let Some(fruit) = fruit {
        steps.push(format!("Add fresh {} as garnish or side", fruit.name));
    }

    steps.push("Season with herbs and spices to taste (avoid high-sodium seasonings)".to_owned());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, protein: f64, fat: f64) -> FoodItem {
        FoodItem {
            name: name.to_owned(),
            calories: 100.0,
            protein,
            fat,
            carbohydrates: 0.0,
            fiber: 0.0,
            sodium: 0.0,
            serving_size: "100g".to_owned(),
            is_vegetarian: true,
            category: FoodCategory::Protein,
        }
    }

    #[test]
    fn test_best_protein_keeps_first_on_tie() {
        let a = food("a", 10.0, 1.0);
        let b = food("b", 20.0, 2.0);
        let c = food("c", 5.0, 1.0);
        let best = best_protein(&[&c, &a, &b]).unwrap();
        assert_eq!(best.name, "a");
    }

    #[test]
    fn test_best_protein_floors_fat() {
        // 2.0 / max(0.0, 0.1) = 20 beats 9.0 / 1.0
        let zero_fat = food("zero", 2.0, 0.0);
        let lean = food("lean", 9.0, 1.0);
        assert_eq!(best_protein(&[&lean, &zero_fat]).unwrap().name, "zero");
    }
}
