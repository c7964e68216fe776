// ABOUTME: Integration tests for multi-day plan assembly
// ABOUTME: Covers dietary filters, per-day and summary totals, and registered menu reuse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use meal_planner_mcp_server::config::MealPlannerConfig;
use meal_planner_mcp_server::intelligence::{FoodTable, PlanAssembler, PlanRequest};
use meal_planner_mcp_server::models::{MealPlan, MealType, NutritionFacts};

fn request(days: u32, daily_calories: f64) -> PlanRequest {
    PlanRequest {
        days,
        daily_calories,
        vegetarian: false,
        exclude_ingredients: Vec::new(),
    }
}

fn food_name(line: &str) -> &str {
    line.split_once("g ").map(|(_, name)| name).unwrap()
}

fn meal_names(plan: &MealPlan, meal_type: MealType) -> Vec<String> {
    plan.days
        .iter()
        .flat_map(|day| day.meals())
        .filter(|meal| meal.meal_type == meal_type)
        .map(|meal| meal.name.clone())
        .collect()
}

#[test]
fn test_vegetarian_plan_without_fish() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let plan_request = PlanRequest {
        vegetarian: true,
        exclude_ingredients: vec!["fish".to_owned()],
        ..request(3, 1800.0)
    };

    let plan = assembler
        .build_plan(&plan_request, &mut common::seeded_rng())
        .unwrap();

    assert_eq!(plan.days.len(), 3);
    assert_eq!(plan.summary.total_days, 3);
    for (index, day) in plan.days.iter().enumerate() {
        assert_eq!(day.day as usize, index + 1);
        assert!(day.snack.is_some());
        assert_eq!(day.meals().count(), 4);
        for meal in day.meals() {
            for line in &meal.ingredients {
                assert!(!line.contains("fish"), "{line}");
                let food = table.lookup(food_name(line)).unwrap();
                assert!(food.is_vegetarian, "{line}");
            }
        }
    }
}

#[test]
fn test_slot_order_and_types() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);

    let plan = assembler
        .build_plan(&request(1, 2000.0), &mut common::seeded_rng())
        .unwrap();
    let types: Vec<MealType> = plan.days[0].meals().map(|meal| meal.meal_type).collect();
    assert_eq!(types, MealType::ALL.to_vec());
}

#[test]
fn test_day_totals_are_sum_of_meals() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);

    let plan = assembler
        .build_plan(&request(4, 2200.0), &mut common::seeded_rng())
        .unwrap();

    for day in &plan.days {
        let summed: NutritionFacts = day.meals().map(|meal| meal.total_nutrition).sum();
        assert_eq!(day.total_nutrition, summed);
    }
}

#[test]
fn test_summary_is_rounded_mean() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);

    let plan = assembler
        .build_plan(&request(5, 1600.0), &mut common::seeded_rng())
        .unwrap();

    let days = f64::from(plan.summary.total_days);
    let mean = |field: fn(&NutritionFacts) -> f64| {
        (plan
            .days
            .iter()
            .map(|day| field(&day.total_nutrition))
            .sum::<f64>()
            / days)
            .round()
    };
    assert!((plan.summary.avg_daily_calories - mean(|n| n.calories)).abs() < f64::EPSILON);
    assert!((plan.summary.avg_daily_protein - mean(|n| n.protein)).abs() < f64::EPSILON);
    assert!((plan.summary.avg_daily_fat - mean(|n| n.fat)).abs() < f64::EPSILON);
    assert!((plan.summary.avg_daily_carbs - mean(|n| n.carbohydrates)).abs() < f64::EPSILON);
}

#[test]
fn test_plan_is_reproducible_with_seed() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let plan_request = request(3, 2000.0);

    let first = assembler
        .build_plan(&plan_request, &mut common::seeded_rng())
        .unwrap();
    let second = assembler
        .build_plan_from_menus(&plan_request, None, &mut common::seeded_rng())
        .unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_registered_menu_fills_matching_slot() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let (_dir, mut store) = common::temp_store();
    let oats = store.register(common::protein_oats()).unwrap();

    // Breakfast slot: 1800 * 0.25 = 450, headroom 540 >= 350
    let plan = assembler
        .build_plan_from_menus(&request(3, 1800.0), Some(&store), &mut common::seeded_rng())
        .unwrap();

    for day in &plan.days {
        assert_eq!(day.breakfast.name, oats.name);
        assert_eq!(day.breakfast.ingredients, oats.ingredients);
        assert_eq!(day.breakfast.total_nutrition, oats.nutrition);
        // No menu for the other slots, so they are composed
        assert!(day.lunch.name.starts_with("Egg whites with "));
    }
}

#[test]
fn test_menu_over_slot_limit_is_skipped() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let (_dir, mut store) = common::temp_store();
    store
        .register(common::registration(
            "Big Breakfast",
            MealType::Breakfast,
            common::nutrition(800.0, 50.0, 10.0),
            &[],
        ))
        .unwrap();

    let plan = assembler
        .build_plan_from_menus(&request(2, 1800.0), Some(&store), &mut common::seeded_rng())
        .unwrap();
    assert!(meal_names(&plan, MealType::Breakfast)
        .iter()
        .all(|name| name != "Big Breakfast"));
}

#[test]
fn test_menu_filtered_by_diet_and_exclusions() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let (_dir, mut store) = common::temp_store();
    store
        .register(common::registration(
            "Turkey Wrap",
            MealType::Lunch,
            common::nutrition(400.0, 35.0, 6.0),
            &[],
        ))
        .unwrap();
    store.register(common::protein_oats()).unwrap();

    let vegetarian = PlanRequest {
        vegetarian: true,
        ..request(2, 1800.0)
    };
    let plan = assembler
        .build_plan_from_menus(&vegetarian, Some(&store), &mut common::seeded_rng())
        .unwrap();
    assert!(meal_names(&plan, MealType::Lunch)
        .iter()
        .all(|name| name != "Turkey Wrap"));
    assert!(meal_names(&plan, MealType::Breakfast)
        .iter()
        .all(|name| name == "Protein Oats"));

    let no_yogurt = PlanRequest {
        exclude_ingredients: vec!["Yogurt".to_owned()],
        ..request(2, 1800.0)
    };
    let plan = assembler
        .build_plan_from_menus(&no_yogurt, Some(&store), &mut common::seeded_rng())
        .unwrap();
    assert!(meal_names(&plan, MealType::Breakfast)
        .iter()
        .all(|name| name != "Protein Oats"));
    assert!(meal_names(&plan, MealType::Lunch)
        .iter()
        .all(|name| name == "Turkey Wrap"));
}

#[test]
fn test_menus_vary_across_days_when_several_fit() {
    let table = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&table, &config);
    let (_dir, mut store) = common::temp_store();
    for name in ["Dinner A", "Dinner B", "Dinner C"] {
        store
            .register(common::registration(
                name,
                MealType::Dinner,
                common::nutrition(500.0, 45.0, 8.0),
                &[],
            ))
            .unwrap();
    }

    let plan = assembler
        .build_plan_from_menus(&request(14, 2000.0), Some(&store), &mut common::seeded_rng())
        .unwrap();
    let dinners = meal_names(&plan, MealType::Dinner);
    assert_eq!(dinners.len(), 14);
    assert!(dinners.iter().all(|name| name.starts_with("Dinner ")));
    let first = &dinners[0];
    assert!(dinners.iter().any(|name| name != first));
}
