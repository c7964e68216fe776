// ABOUTME: Fixed nutrition table of lean proteins, vegetables, grains, dairy, and fruit
// ABOUTME: Case-insensitive lookup plus category/vegetarian filters and substring search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Table
//!
//! Per-serving values are for 100g unless the serving label says otherwise
//! (cooked legumes and grains are measured cooked). The table is built once
//! at startup and never mutated.

use std::collections::HashMap;

use crate::models::{FoodCategory, FoodItem};

/// Calories, protein, fat, carbohydrates, fiber, sodium
type Facts = [f64; 6];

const SERVING_100G: &str = "100g";
const SERVING_100G_COOKED: &str = "100g cooked";

/// Built-in rows: name, facts, serving label, vegetarian, category
const STANDARD_FOODS: &[(&str, Facts, &str, bool, FoodCategory)] = &[
    // Proteins
    ("chicken breast", [165.0, 31.0, 3.6, 0.0, 0.0, 74.0], SERVING_100G, false, FoodCategory::Protein),
    ("salmon fillet", [208.0, 22.0, 12.0, 0.0, 0.0, 59.0], SERVING_100G, false, FoodCategory::Protein),
    ("white fish", [82.0, 18.0, 0.7, 0.0, 0.0, 78.0], SERVING_100G, false, FoodCategory::Protein),
    ("egg whites", [52.0, 11.0, 0.2, 0.7, 0.0, 166.0], SERVING_100G, true, FoodCategory::Protein),
    ("tofu", [76.0, 8.0, 4.8, 1.9, 0.3, 7.0], SERVING_100G, true, FoodCategory::Protein),
    ("tempeh", [192.0, 19.0, 11.0, 9.0, 9.0, 9.0], SERVING_100G, true, FoodCategory::Protein),
    ("lentils", [116.0, 9.0, 0.4, 20.0, 8.0, 2.0], SERVING_100G_COOKED, true, FoodCategory::Protein),
    ("chickpeas", [164.0, 8.0, 2.6, 27.0, 8.0, 7.0], SERVING_100G_COOKED, true, FoodCategory::Protein),
    // Dairy
    ("greek yogurt", [97.0, 10.0, 0.4, 6.0, 0.0, 36.0], SERVING_100G, true, FoodCategory::Dairy),
    ("cottage cheese", [98.0, 11.0, 4.3, 3.4, 0.0, 364.0], SERVING_100G, true, FoodCategory::Dairy),
    // Vegetables
    ("broccoli", [34.0, 2.8, 0.4, 7.0, 2.6, 33.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("spinach", [23.0, 2.9, 0.4, 3.6, 2.2, 79.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("bell peppers", [31.0, 1.0, 0.3, 7.0, 2.5, 4.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("asparagus", [20.0, 2.2, 0.1, 3.9, 2.1, 2.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("cucumber", [16.0, 0.7, 0.1, 4.0, 0.5, 2.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("zucchini", [17.0, 1.2, 0.3, 3.1, 1.0, 8.0], SERVING_100G, true, FoodCategory::Vegetable),
    ("sweet potato", [86.0, 1.6, 0.1, 20.0, 3.0, 7.0], SERVING_100G, true, FoodCategory::Vegetable),
    // Grains
    ("brown rice", [112.0, 2.6, 0.9, 23.0, 1.8, 7.0], SERVING_100G_COOKED, true, FoodCategory::Grain),
    ("quinoa", [120.0, 4.4, 1.9, 22.0, 2.8, 7.0], SERVING_100G_COOKED, true, FoodCategory::Grain),
    ("oatmeal", [68.0, 2.4, 1.4, 12.0, 1.7, 49.0], SERVING_100G_COOKED, true, FoodCategory::Grain),
    // Fruits
    ("blueberries", [57.0, 0.7, 0.3, 14.0, 2.4, 1.0], SERVING_100G, true, FoodCategory::Fruit),
    ("strawberries", [32.0, 0.7, 0.3, 7.7, 2.0, 1.0], SERVING_100G, true, FoodCategory::Fruit),
    ("apple", [52.0, 0.3, 0.2, 14.0, 2.4, 1.0], SERVING_100G, true, FoodCategory::Fruit),
];

/// Read-only table of foods keyed by lowercase name
#[derive(Debug, Clone)]
pub struct FoodTable {
    foods: Vec<FoodItem>,
    index: HashMap<String, usize>,
}

impl FoodTable {
    /// Build a table from arbitrary rows
    ///
    /// Names are normalized to lowercase; a later row with a duplicate name
    /// replaces the earlier one.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = FoodItem>) -> Self {
        let mut foods: Vec<FoodItem> = Vec::new();
        let mut index = HashMap::new();
        for mut item in items {
            item.name = normalize(&item.name);
            if let Some(&position) = index.get(&item.name) {
                foods[position] = item;
            } else {
                index.insert(item.name.clone(), foods.len());
                foods.push(item);
            }
        }
        Self { foods, index }
    }

    /// The built-in low-fat, high-protein food list
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_FOODS.iter().map(
            |&(name, facts, serving_size, is_vegetarian, category)| {
                let [calories, protein, fat, carbohydrates, fiber, sodium] = facts;
                FoodItem {
                    name: name.to_owned(),
                    calories,
                    protein,
                    fat,
                    carbohydrates,
                    fiber,
                    sodium,
                    serving_size: serving_size.to_owned(),
                    is_vegetarian,
                    category,
                }
            },
        ))
    }

    /// Case-insensitive exact lookup; surrounding whitespace is ignored
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FoodItem> {
        self.index
            .get(&normalize(name))
            .and_then(|&position| self.foods.get(position))
    }

    /// Foods matching a predicate, in table order
    pub fn filter<P>(&self, predicate: P) -> Vec<&FoodItem>
    where
        P: Fn(&FoodItem) -> bool,
    {
        self.foods.iter().filter(|food| predicate(food)).collect()
    }

    /// Foods whose name contains the substring, case-insensitively
    #[must_use]
    pub fn search(&self, substring: &str) -> Vec<&FoodItem> {
        let needle = normalize(substring);
        self.filter(|food| food.name.contains(&needle))
    }

    /// Foods in one category
    #[must_use]
    pub fn by_category(&self, category: FoodCategory) -> Vec<&FoodItem> {
        self.filter(|food| food.category == category)
    }

    /// Vegetarian foods only
    #[must_use]
    pub fn vegetarian(&self) -> Vec<&FoodItem> {
        self.filter(|food| food.is_vegetarian)
    }

    /// Every food in table order
    #[must_use]
    pub fn all(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether the table has no foods
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl Default for FoodTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
