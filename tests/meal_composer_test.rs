// ABOUTME: Integration tests for single-meal composition
// ABOUTME: Checks protein choice, vegetable/grain/fruit rules, totals, and pool exhaustion errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use meal_planner_mcp_server::config::MealPlannerConfig;
use meal_planner_mcp_server::intelligence::{
    CompositionError, FoodTable, MealComposer, MealRequest,
};
use meal_planner_mcp_server::models::{FoodCategory, MealSuggestion, MealType, NutritionFacts};

fn food_name(line: &str) -> &str {
    line.split_once("g ").map(|(_, name)| name).unwrap()
}

/// Recompute a composed meal's totals from its ingredient lines
fn expected_totals(
    table: &FoodTable,
    config: &MealPlannerConfig,
    meal: &MealSuggestion,
    target: f64,
) -> NutritionFacts {
    let protein_calories = target * config.protein_calorie_share;
    let remaining = target - (protein_calories + config.vegetable_calorie_allowance);
    let mut vegetables_seen = 0;

    meal.ingredients
        .iter()
        .map(|line| {
            let food = table.lookup(food_name(line)).unwrap();
            let servings = match food.category {
                FoodCategory::Protein => protein_calories / food.calories,
                FoodCategory::Vegetable => {
                    vegetables_seen += 1;
                    if vegetables_seen == 1 {
                        config.primary_vegetable_serving
                    } else {
                        config.secondary_vegetable_serving
                    }
                }
                FoodCategory::Grain => remaining / food.calories,
                FoodCategory::Fruit => config.fruit_serving,
                other => panic!("unexpected category {other}"),
            };
            food.nutrition().scaled(servings)
        })
        .sum::<NutritionFacts>()
        .rounded()
}

fn categories(table: &FoodTable, meal: &MealSuggestion) -> Vec<FoodCategory> {
    meal.ingredients
        .iter()
        .map(|line| table.lookup(food_name(line)).unwrap().category)
        .collect()
}

#[test]
fn test_best_ratio_protein_is_chosen() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);

    let meal = composer
        .compose(&MealRequest::new(MealType::Lunch), &mut common::seeded_rng())
        .unwrap();

    assert!(meal.ingredients[0].ends_with("egg whites"));
    assert!(meal.name.starts_with("Egg whites with "));
    // 450 * 0.4 / 52 servings of egg whites
    assert_eq!(meal.ingredients[0], "346g egg whites");
}

#[test]
fn test_exclusions_change_protein() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let mut rng = common::seeded_rng();

    let no_egg = MealRequest::new(MealType::Dinner).excluding(vec!["EGG".to_owned()]);
    let meal = composer.compose(&no_egg, &mut rng).unwrap();
    assert!(meal.ingredients[0].ends_with("white fish"));

    let vegetarian_no_egg = no_egg.vegetarian(true);
    let meal = composer.compose(&vegetarian_no_egg, &mut rng).unwrap();
    assert!(meal.ingredients[0].ends_with("lentils"));
}

#[test]
fn test_excluded_substrings_never_appear() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let mut rng = common::seeded_rng();
    let excluded = vec!["broccoli".to_owned(), "rice".to_owned(), "berries".to_owned()];

    for _ in 0..25 {
        let request = MealRequest::new(MealType::Breakfast)
            .with_calories(600.0)
            .excluding(excluded.clone());
        let meal = composer.compose(&request, &mut rng).unwrap();
        for line in &meal.ingredients {
            assert!(!line.contains("broccoli"), "{line}");
            assert!(!line.contains("rice"), "{line}");
            assert!(!line.contains("berries"), "{line}");
        }
    }
}

#[test]
fn test_vegetables_are_distinct() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let mut rng = common::seeded_rng();

    for _ in 0..50 {
        let meal = composer
            .compose(&MealRequest::new(MealType::Dinner), &mut rng)
            .unwrap();
        assert_ne!(meal.ingredients[1], meal.ingredients[2]);
        assert!(meal.ingredients[1].starts_with("100g "));
        assert!(meal.ingredients[2].starts_with("50g "));
    }
}

#[test]
fn test_snack_has_fruit_but_no_grain() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);

    let meal = composer
        .compose(&MealRequest::new(MealType::Snack), &mut common::seeded_rng())
        .unwrap();

    assert_eq!(
        categories(&table, &meal),
        vec![
            FoodCategory::Protein,
            FoodCategory::Vegetable,
            FoodCategory::Vegetable,
            FoodCategory::Fruit,
        ]
    );
    assert!(meal.ingredients[3].starts_with("50g "));
    assert_eq!(meal.prep_time, 10);
    assert_eq!(meal.servings, 1);
    assert!(!meal.name.contains(" and "));
}

#[test]
fn test_grain_threshold_is_strict() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let mut rng = common::seeded_rng();

    // 250 - (100 + 50) = 100, not above the threshold
    let at_threshold = composer
        .compose(&MealRequest::new(MealType::Lunch).with_calories(250.0), &mut rng)
        .unwrap();
    assert!(!categories(&table, &at_threshold).contains(&FoodCategory::Grain));

    let above = composer
        .compose(&MealRequest::new(MealType::Lunch).with_calories(260.0), &mut rng)
        .unwrap();
    let cats = categories(&table, &above);
    assert_eq!(cats.last(), Some(&FoodCategory::Grain));
    assert!(above.name.contains(" and "));
    assert!(!cats.contains(&FoodCategory::Fruit));
}

#[test]
fn test_totals_match_scaled_ingredients() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let mut rng = common::seeded_rng();

    for meal_type in MealType::ALL {
        for target in [150.0, 400.0, 900.0] {
            let request = MealRequest::new(meal_type).with_calories(target);
            let meal = composer.compose(&request, &mut rng).unwrap();
            assert_eq!(
                meal.total_nutrition,
                expected_totals(&table, &config, &meal, target),
                "{meal_type} at {target} kcal"
            );
            assert_eq!(meal.meal_type, meal_type);
            assert_eq!(meal.prep_time, meal_type.prep_time_minutes());
        }
    }
}

#[test]
fn test_totals_are_whole_numbers() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);

    let meal = composer
        .compose(&MealRequest::new(MealType::Breakfast), &mut common::seeded_rng())
        .unwrap();
    let totals = meal.total_nutrition;
    for value in [
        totals.calories,
        totals.protein,
        totals.fat,
        totals.carbohydrates,
        totals.fiber,
        totals.sodium,
    ] {
        assert!(value.fract().abs() < f64::EPSILON, "{value}");
    }
}

#[test]
fn test_same_seed_same_meal() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let request = MealRequest::new(MealType::Dinner).with_calories(700.0);

    let first = composer.compose(&request, &mut common::seeded_rng()).unwrap();
    let second = composer.compose(&request, &mut common::seeded_rng()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_egg_instructions() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);

    let meal = composer
        .compose(&MealRequest::new(MealType::Snack), &mut common::seeded_rng())
        .unwrap();

    assert_eq!(meal.instructions[0], "Wash and prepare all vegetables");
    assert!(meal
        .instructions
        .iter()
        .any(|step| step == "Whisk egg whites and cook in non-stick pan over medium heat"));
    assert!(meal
        .instructions
        .iter()
        .any(|step| step == "Plate egg whites with vegetables"));
    assert!(meal
        .instructions
        .iter()
        .any(|step| step.starts_with("Add fresh ")));
    assert_eq!(
        meal.instructions.last().unwrap(),
        "Season with herbs and spices to taste (avoid high-sodium seasonings)"
    );
}

#[test]
fn test_no_protein_left() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let every_protein = [
        "chicken", "salmon", "fish", "egg", "tofu", "tempeh", "lentils", "chickpeas",
    ]
    .map(str::to_owned)
    .to_vec();

    let error = composer
        .compose(
            &MealRequest::new(MealType::Lunch).excluding(every_protein),
            &mut common::seeded_rng(),
        )
        .unwrap_err();
    assert_eq!(error, CompositionError::NoEligibleProtein);
}

#[test]
fn test_too_few_vegetables() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let all_but_sweet_potato = [
        "broccoli", "spinach", "bell", "asparagus", "cucumber", "zucchini",
    ]
    .map(str::to_owned)
    .to_vec();

    let error = composer
        .compose(
            &MealRequest::new(MealType::Lunch).excluding(all_but_sweet_potato),
            &mut common::seeded_rng(),
        )
        .unwrap_err();
    assert_eq!(error, CompositionError::NotEnoughVegetables { available: 1 });
}

#[test]
fn test_missing_grain_and_fruit_are_skipped() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&table, &config);
    let no_sides = ["rice", "quinoa", "oatmeal", "berries", "apple"]
        .map(str::to_owned)
        .to_vec();

    let meal = composer
        .compose(
            &MealRequest::new(MealType::Breakfast)
                .with_calories(800.0)
                .excluding(no_sides),
            &mut common::seeded_rng(),
        )
        .unwrap();
    assert_eq!(meal.ingredients.len(), 3);
}
