// ABOUTME: Criterion benchmarks for meal composition, plan assembly, and menu ranking
// ABOUTME: Measures per-meal latency and plan throughput across plan lengths with a seeded RNG
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the meal planner.
//!
//! All runs use a fixed-seed `ChaCha8Rng` so every iteration does comparable work.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meal_planner_mcp_server::config::MealPlannerConfig;
use meal_planner_mcp_server::database::MenuStore;
use meal_planner_mcp_server::intelligence::{
    FoodTable, MealComposer, MealRequest, PlanAssembler, PlanRequest,
};
use meal_planner_mcp_server::models::{
    MealType, MenuRegistration, MenuSuggestionCriteria, NutritionFacts,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

const SEED: u64 = 7;

fn plan_request(days: u32) -> PlanRequest {
    PlanRequest {
        days,
        daily_calories: 2000.0,
        vegetarian: false,
        exclude_ingredients: vec!["salmon".to_owned()],
    }
}

/// Store with `count` menus spread over the four slots
fn populated_store(dir: &TempDir, count: usize) -> MenuStore {
    let mut store = MenuStore::open(dir.path().join("menus.json")).unwrap();
    for index in 0..count {
        let meal_type = MealType::ALL[index % MealType::ALL.len()];
        let step = (index % 10) as f64;
        store
            .register(MenuRegistration {
                name: format!("Bench menu {index}"),
                description: String::new(),
                ingredients: vec!["100g chicken breast".to_owned()],
                instructions: Vec::new(),
                meal_type,
                nutrition: NutritionFacts {
                    calories: 20.0f64.mul_add(step, 250.0),
                    protein: 25.0 + step,
                    fat: 2.0 + step,
                    carbohydrates: 30.0,
                    fiber: 4.0,
                    sodium: 200.0,
                },
                prep_time: 15,
                servings: 1,
                tags: if index % 2 == 0 {
                    vec!["vegetarian".to_owned()]
                } else {
                    Vec::new()
                },
            })
            .unwrap();
    }
    store
}

fn bench_meal_composition(c: &mut Criterion) {
    let foods = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let composer = MealComposer::new(&foods, &config);
    let mut group = c.benchmark_group("meal_composition");

    for meal_type in MealType::ALL {
        let request = MealRequest::new(meal_type).excluding(vec!["egg".to_owned()]);
        group.bench_with_input(
            BenchmarkId::new("compose", meal_type.as_str()),
            &request,
            |b, request| {
                let mut rng = ChaCha8Rng::seed_from_u64(SEED);
                b.iter(|| composer.compose(black_box(request), &mut rng).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_plan_assembly(c: &mut Criterion) {
    let foods = FoodTable::standard();
    let config = MealPlannerConfig::default();
    let assembler = PlanAssembler::new(&foods, &config);
    let dir = TempDir::new().unwrap();
    let store = populated_store(&dir, 40);
    let mut group = c.benchmark_group("meal_plan");

    for days in [1_u32, 7, 14] {
        let request = plan_request(days);
        group.throughput(Throughput::Elements(u64::from(days)));

        group.bench_with_input(BenchmarkId::new("generated", days), &request, |b, request| {
            let mut rng = ChaCha8Rng::seed_from_u64(SEED);
            b.iter(|| assembler.build_plan(black_box(request), &mut rng).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("from_menus", days), &request, |b, request| {
            let mut rng = ChaCha8Rng::seed_from_u64(SEED);
            b.iter(|| {
                assembler
                    .build_plan_from_menus(black_box(request), Some(&store), &mut rng)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_menu_suggestions(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_suggestions");
    let criteria = MenuSuggestionCriteria {
        meal_type: Some(MealType::Dinner),
        max_calories: Some(400.0),
        vegetarian: true,
        ..MenuSuggestionCriteria::default()
    };

    for count in [10_usize, 100, 500] {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("suggest", count), &criteria, |b, criteria| {
            b.iter(|| store.suggest(black_box(criteria)).len());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_meal_composition,
    bench_plan_assembly,
    bench_menu_suggestions,
);
criterion_main!(benches);
