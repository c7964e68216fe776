// ABOUTME: Environment configuration for the stdio server: store location, seed, deployment mode
// ABOUTME: Parses MENU_STORE_PATH, MENU_STORE_ENABLED, MEAL_PLANNER_SEED, and ENVIRONMENT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::planner::MealPlannerConfig;
use crate::constants::menu_store::{APP_DIR, DATA_DIR, FILE_NAME};

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Menu store location and enablement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuStoreConfig {
    /// Whether the server opens a menu store at all
    pub enabled: bool,
    /// Path of the JSON store file
    pub path: PathBuf,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment mode
    pub environment: Environment,
    /// Menu store settings
    pub menu_store: MenuStoreConfig,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
    /// Composer and assembler tunables
    pub planner: MealPlannerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `MENU_STORE_ENABLED` or `MEAL_PLANNER_SEED` is set but unparseable,
    /// or no default store location can be determined
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let enabled = parse_bool(&env_var_or("MENU_STORE_ENABLED", "true"))
            .context("Invalid MENU_STORE_ENABLED value")?;

        let path = match env::var("MENU_STORE_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_store_path()?,
        };

        let seed = env::var("MEAL_PLANNER_SEED")
            .ok()
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .context("Invalid MEAL_PLANNER_SEED value")?;

        Ok(Self {
            environment,
            menu_store: MenuStoreConfig { enabled, path },
            seed,
            planner: MealPlannerConfig::from_env(),
        })
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Meal Planner MCP Server Configuration:\n\
             - Environment: {}\n\
             - Menu Store: {}\n\
             - Random Seed: {}",
            self.environment,
            if self.menu_store.enabled {
                self.menu_store.path.display().to_string()
            } else {
                "Disabled".to_owned()
            },
            self.seed
                .map_or_else(|| "entropy".to_owned(), |seed| seed.to_string()),
        )
    }
}

/// Default store path: `<install dir>/data/menus.json`
///
/// The install dir is the parent of the directory holding the executable.
/// Falls back to the platform data directory when the executable path is unknown.
///
/// # Errors
///
/// Returns an error if neither location can be determined
pub fn default_store_path() -> Result<PathBuf> {
    if let Some(install_dir) = env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
    {
        return Ok(install_dir.join(DATA_DIR).join(FILE_NAME));
    }

    warn!("Executable location unknown, using platform data directory for the menu store");
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .context("Unable to determine a default menu store location; set MENU_STORE_PATH")
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Accepts true/false, 1/0, yes/no, on/off
fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" 1 ").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_environment_fallback() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_default_store_path_ends_with_data_file() {
        let path = default_store_path().unwrap();
        assert!(path.ends_with("data/menus.json") || path.ends_with("meal-planner/menus.json"));
    }
}
