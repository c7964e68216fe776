// ABOUTME: Argument extraction helpers shared by the meal and menu tools.
// ABOUTME: Turns raw JSON tool arguments into typed values with range checks.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tool argument helpers
//!
//! Absent and `null` arguments are treated the same. Type mismatches become
//! [`ToolError::InvalidParameter`], range violations `ValueOutOfRange`.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::constants::limits::{DAILY_CALORIES_MAX, DAILY_CALORIES_MIN, PLAN_DAYS_MAX, PLAN_DAYS_MIN};
use crate::errors::{AppError, AppResult};
use crate::intelligence::PlanRequest;
use crate::mcp::schema::PropertySchema;
use crate::models::MealType;
use crate::tools::errors::ToolError;

fn present<'a>(args: &'a Value, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|value| !value.is_null())
}

/// Optional number
pub(super) fn optional_f64(tool: &str, args: &Value, key: &str) -> AppResult<Option<f64>> {
    present(args, key)
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| ToolError::invalid_parameter(tool, key, "must be a number").into())
        })
        .transpose()
}

/// Required number
pub(super) fn required_f64(tool: &str, args: &Value, key: &str) -> AppResult<f64> {
    optional_f64(tool, args, key)?.ok_or_else(|| ToolError::missing_parameter(tool, key).into())
}

/// Optional boolean
pub(super) fn optional_bool(tool: &str, args: &Value, key: &str) -> AppResult<Option<bool>> {
    present(args, key)
        .map(|value| {
            value
                .as_bool()
                .ok_or_else(|| ToolError::invalid_parameter(tool, key, "must be a boolean").into())
        })
        .transpose()
}

/// Optional string
pub(super) fn optional_str<'a>(
    tool: &str,
    args: &'a Value,
    key: &str,
) -> AppResult<Option<&'a str>> {
    present(args, key)
        .map(|value| {
            value
                .as_str()
                .ok_or_else(|| ToolError::invalid_parameter(tool, key, "must be a string").into())
        })
        .transpose()
}

/// Required, non-blank string
pub(super) fn required_str<'a>(tool: &str, args: &'a Value, key: &str) -> AppResult<&'a str> {
    optional_str(tool, args, key)?
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ToolError::missing_parameter(tool, key).into())
}

/// Array of strings; absent means empty
pub(super) fn string_list(tool: &str, args: &Value, key: &str) -> AppResult<Vec<String>> {
    let Some(value) = present(args, key) else {
        return Ok(Vec::new());
    };
    let invalid = || -> AppError {
        ToolError::invalid_parameter(tool, key, "must be an array of strings").into()
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

/// Optional meal type, matched case-insensitively
pub(super) fn optional_meal_type(
    tool: &str,
    args: &Value,
    key: &str,
) -> AppResult<Option<MealType>> {
    optional_str(tool, args, key)?
        .map(str::parse::<MealType>)
        .transpose()
}

/// Reject values outside `[min, max]`
pub(super) fn within(key: &str, value: f64, min: f64, max: f64) -> AppResult<f64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::out_of_range(format!(
            "{key} must be between {min} and {max}, got {value}"
        )))
    }
}

/// Reject values below `min`
pub(super) fn at_least(key: &str, value: f64, min: f64) -> AppResult<f64> {
    if value >= min {
        Ok(value)
    } else {
        Err(AppError::out_of_range(format!(
            "{key} must be at least {min}, got {value}"
        )))
    }
}

/// Whole number within `[min, max]`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Safe: range-checked against u32 bounds before the cast
pub(super) fn whole_within(tool: &str, key: &str, value: f64, min: u32, max: u32) -> AppResult<u32> {
    if value.fract().abs() > f64::EPSILON {
        return Err(ToolError::invalid_parameter(tool, key, "must be a whole number").into());
    }
    within(key, value, f64::from(min), f64::from(max)).map(|whole| whole as u32)
}

/// Decode the full argument object into a typed record
pub(super) fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> AppResult<T> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|error| ToolError::invalid_parameter(tool, "arguments", error.to_string()).into())
}

/// Read the `days` / `dailyCalories` / `vegetarian` / `excludeIngredients` block shared by plan tools
pub(super) fn plan_request(tool: &str, args: &Value) -> AppResult<PlanRequest> {
    let days = whole_within(
        tool,
        "days",
        required_f64(tool, args, "days")?,
        PLAN_DAYS_MIN,
        PLAN_DAYS_MAX,
    )?;
    let daily_calories = within(
        "dailyCalories",
        required_f64(tool, args, "dailyCalories")?,
        DAILY_CALORIES_MIN,
        DAILY_CALORIES_MAX,
    )?;

    Ok(PlanRequest {
        days,
        daily_calories,
        vegetarian: optional_bool(tool, args, "vegetarian")?.unwrap_or(false),
        exclude_ingredients: string_list(tool, args, "excludeIngredients")?,
    })
}

/// Schema properties shared by plan tools
pub(super) fn plan_properties() -> Vec<(&'static str, PropertySchema)> {
    vec![
        (
            "days",
            PropertySchema::integer("Number of days for the meal plan")
                .with_range(f64::from(PLAN_DAYS_MIN), f64::from(PLAN_DAYS_MAX)),
        ),
        (
            "dailyCalories",
            PropertySchema::number("Target daily calories")
                .with_range(DAILY_CALORIES_MIN, DAILY_CALORIES_MAX),
        ),
        (
            "vegetarian",
            PropertySchema::boolean("Whether to include only vegetarian options")
                .with_default(json!(false)),
        ),
        (
            "excludeIngredients",
            PropertySchema::string_array("Ingredients to exclude from the meal plan"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_null_counts_as_absent() {
        let args = json!({"calories": null});
        assert_eq!(optional_f64("t", &args, "calories").unwrap(), None);
        assert!(string_list("t", &args, "excludeIngredients").unwrap().is_empty());
    }

    #[test]
    fn test_blank_required_string_is_missing() {
        let error = required_str("t", &json!({"id": "  "}), "id").unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_whole_within_rejects_fraction_and_range() {
        assert_eq!(whole_within("t", "days", 3.0, 1, 14).unwrap(), 3);
        assert_eq!(
            whole_within("t", "days", 2.5, 1, 14).unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            whole_within("t", "days", 15.0, 1, 14).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_string_list_rejects_mixed_array() {
        let error = string_list("t", &json!({"tags": ["a", 1]}), "tags").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }
}
