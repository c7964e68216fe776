// ABOUTME: Food, nutrition, and meal-type models shared by the nutrition table and composer
// ABOUTME: Defines FoodItem, FoodCategory, MealType, and the six-field NutritionFacts record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::nutrition::FAT_FLOOR_G;
use crate::errors::AppError;

/// Food category used to partition the candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    /// Primary protein source
    Protein,
    /// Vegetable
    Vegetable,
    /// Grain or starch
    Grain,
    /// Dairy product
    Dairy,
    /// Fruit
    Fruit,
    /// Anything else
    Other,
}

impl FoodCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Protein,
        Self::Vegetable,
        Self::Grain,
        Self::Dairy,
        Self::Fruit,
        Self::Other,
    ];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Vegetable => "vegetable",
            Self::Grain => "grain",
            Self::Dairy => "dairy",
            Self::Fruit => "fruit",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid category '{s}'. Must be one of: protein, vegetable, grain, dairy, fruit, other"
                ))
            })
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Small between-meal snack
    Snack,
}

impl MealType {
    /// Slots in the order a day is assembled
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Estimated preparation time in minutes for a composed meal
    #[must_use]
    pub const fn prep_time_minutes(self) -> u32 {
        match self {
            Self::Breakfast => 15,
            Self::Lunch => 25,
            Self::Dinner => 35,
            Self::Snack => 10,
        }
    }

    /// Calorie target used when the caller does not supply one
    #[must_use]
    pub const fn default_calories(self) -> f64 {
        match self {
            Self::Breakfast => 350.0,
            Self::Lunch => 450.0,
            Self::Dinner => 500.0,
            Self::Snack => 150.0,
        }
    }

    /// Whether the composer adds a fruit side to this meal
    #[must_use]
    pub const fn includes_fruit(self) -> bool {
        matches!(self, Self::Breakfast | Self::Snack)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|meal_type| meal_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid mealType '{s}'. Must be one of: breakfast, lunch, dinner, snack"
                ))
            })
    }
}

/// Nutrition totals: calories, macronutrient grams, fiber grams, sodium milligrams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
    /// Carbohydrates in grams
    pub carbohydrates: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Sodium in milligrams
    pub sodium: f64,
}

impl NutritionFacts {
    /// Protein grams per gram of fat, with fat floored at 0.1g
    #[must_use]
    pub fn protein_to_fat_ratio(&self) -> f64 {
        protein_to_fat_ratio(self.protein, self.fat)
    }

    /// Multiply every field by a serving multiplier
    #[must_use]
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            fat: self.fat * multiplier,
            carbohydrates: self.carbohydrates * multiplier,
            fiber: self.fiber * multiplier,
            sodium: self.sodium * multiplier,
        }
    }

    /// Round every field to the nearest integer independently
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: self.protein.round(),
            fat: self.fat.round(),
            carbohydrates: self.carbohydrates.round(),
            fiber: self.fiber.round(),
            sodium: self.sodium.round(),
        }
    }

    /// Name of the first field that is negative or not finite, if any
    #[must_use]
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbohydrates", self.carbohydrates),
            ("fiber", self.fiber),
            ("sodium", self.sodium),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(name, _)| name)
    }
}

impl Add for NutritionFacts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbohydrates: self.carbohydrates + rhs.carbohydrates,
            fiber: self.fiber + rhs.fiber,
            sodium: self.sodium + rhs.sodium,
        }
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for NutritionFacts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Protein-to-fat ratio with the fat floor applied
#[must_use]
pub fn protein_to_fat_ratio(protein: f64, fat: f64) -> f64 {
    protein / fat.max(FAT_FLOOR_G)
}

/// One row of the nutrition table, facts given per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Lowercase food name (unique key)
    pub name: String,
    /// Energy per serving in kcal
    pub calories: f64,
    /// Protein per serving in grams
    pub protein: f64,
    /// Fat per serving in grams
    pub fat: f64,
    /// Carbohydrates per serving in grams
    pub carbohydrates: f64,
    /// Fiber per serving in grams
    pub fiber: f64,
    /// Sodium per serving in milligrams
    pub sodium: f64,
    /// Human-readable serving label (e.g. "100g cooked")
    pub serving_size: String,
    /// Whether the food suits a vegetarian diet
    pub is_vegetarian: bool,
    /// Category used by the composer
    pub category: FoodCategory,
}

impl FoodItem {
    /// Per-serving nutrition facts
    #[must_use]
    pub const fn nutrition(&self) -> NutritionFacts {
        NutritionFacts {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbohydrates: self.carbohydrates,
            fiber: self.fiber,
            sodium: self.sodium,
        }
    }

    /// Protein-to-fat ratio of one serving
    #[must_use]
    pub fn protein_to_fat_ratio(&self) -> f64 {
        protein_to_fat_ratio(self.protein, self.fat)
    }

    /// Case-insensitive substring match against the food name
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Name with its first letter capitalized, used in meal titles
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_floors_fat() {
        assert!((protein_to_fat_ratio(10.0, 0.0) - 100.0).abs() < f64::EPSILON);
        assert!((protein_to_fat_ratio(10.0, 0.05) - 100.0).abs() < f64::EPSILON);
        assert!((protein_to_fat_ratio(10.0, 2.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meal_type_parsing_is_case_insensitive() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_rounding_is_per_field() {
        let facts = NutritionFacts {
            calories: 99.5,
            protein: 10.49,
            fat: 0.5,
            carbohydrates: 1.2,
            fiber: 0.0,
            sodium: 7.7,
        }
        .rounded();
        assert!((facts.calories - 100.0).abs() < f64::EPSILON);
        assert!((facts.protein - 10.0).abs() < f64::EPSILON);
        assert!((facts.fat - 1.0).abs() < f64::EPSILON);
        assert!((facts.sodium - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_field_detection() {
        let facts = NutritionFacts {
            fat: -1.0,
            ..NutritionFacts::default()
        };
        assert_eq!(facts.first_invalid_field(), Some("fat"));
        assert_eq!(NutritionFacts::default().first_invalid_field(), None);
    }
}
