// ABOUTME: Integration tests for the built-in nutrition table
// ABOUTME: Covers case-insensitive lookup, substring search, and category and vegetarian views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use meal_planner_mcp_server::intelligence::FoodTable;
use meal_planner_mcp_server::models::{FoodCategory, FoodItem};

fn item(name: &str, calories: f64, category: FoodCategory) -> FoodItem {
    FoodItem {
        name: name.to_owned(),
        calories,
        protein: 10.0,
        fat: 1.0,
        carbohydrates: 0.0,
        fiber: 0.0,
        sodium: 0.0,
        serving_size: "100g".to_owned(),
        is_vegetarian: true,
        category,
    }
}

#[test]
fn test_standard_table_size_and_categories() {
    let table = FoodTable::standard();
    assert_eq!(table.len(), 23);
    assert!(!table.is_empty());

    let count = |category| table.by_category(category).len();
    assert_eq!(count(FoodCategory::Protein), 8);
    assert_eq!(count(FoodCategory::Dairy), 2);
    assert_eq!(count(FoodCategory::Vegetable), 7);
    assert_eq!(count(FoodCategory::Grain), 3);
    assert_eq!(count(FoodCategory::Fruit), 3);
    assert_eq!(count(FoodCategory::Other), 0);
}

#[test]
fn test_lookup_ignores_case_and_whitespace() {
    let table = FoodTable::standard();
    let lower = table.lookup("chicken breast").unwrap();
    let mixed = table.lookup("  Chicken BREAST ").unwrap();
    assert_eq!(lower, mixed);
    assert!((lower.calories - 165.0).abs() < f64::EPSILON);
    assert!((lower.protein - 31.0).abs() < f64::EPSILON);
    assert!(!lower.is_vegetarian);
}

#[test]
fn test_lookup_unknown_food() {
    let table = FoodTable::standard();
    assert!(table.lookup("kale").is_none());
    assert!(table.lookup("").is_none());
    // Exact match only; substrings go through search
    assert!(table.lookup("chicken").is_none());
}

#[test]
fn test_search_is_substring_and_case_insensitive() {
    let table = FoodTable::standard();
    let names: Vec<&str> = table
        .search("RICE")
        .into_iter()
        .map(|food| food.name.as_str())
        .collect();
    assert_eq!(names, vec!["brown rice"]);

    let berries: Vec<&str> = table
        .search("berries")
        .into_iter()
        .map(|food| food.name.as_str())
        .collect();
    assert_eq!(berries, vec!["blueberries", "strawberries"]);

    assert!(table.search("pizza").is_empty());
}

#[test]
fn test_vegetarian_view_excludes_meat_and_fish() {
    let table = FoodTable::standard();
    let vegetarian = table.vegetarian();
    assert_eq!(vegetarian.len(), 20);
    assert!(vegetarian.iter().all(|food| food.is_vegetarian));
    for name in ["chicken breast", "salmon fillet", "white fish"] {
        assert!(vegetarian.iter().all(|food| food.name != name));
    }
}

#[test]
fn test_egg_whites_have_best_protein_ratio() {
    let table = FoodTable::standard();
    let best = table
        .by_category(FoodCategory::Protein)
        .into_iter()
        .max_by(|a, b| a.protein_to_fat_ratio().total_cmp(&b.protein_to_fat_ratio()))
        .unwrap();
    assert_eq!(best.name, "egg whites");
    assert!((best.protein_to_fat_ratio() - 55.0).abs() < 1e-9);
}

#[test]
fn test_custom_table_normalizes_and_replaces_duplicates() {
    let table = FoodTable::new([
        item("Kale", 49.0, FoodCategory::Vegetable),
        item("Seitan", 370.0, FoodCategory::Protein),
        item("kale", 35.0, FoodCategory::Vegetable),
    ]);

    assert_eq!(table.len(), 2);
    let kale = table.lookup("KALE").unwrap();
    assert_eq!(kale.name, "kale");
    assert!((kale.calories - 35.0).abs() < f64::EPSILON);
    // Replacement keeps the original position
    assert_eq!(table.all()[0].name, "kale");
    assert_eq!(table.all()[1].name, "seitan");
}

#[test]
fn test_display_name_capitalizes_first_letter() {
    let table = FoodTable::standard();
    assert_eq!(table.lookup("egg whites").unwrap().display_name(), "Egg whites");
}
