// ABOUTME: Stdio MCP server binary for the meal planner
// ABOUTME: Loads configuration, opens the menu store, registers tools, and serves stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Planner MCP Server Binary
//!
//! Speaks MCP over stdio. Logs go to stderr so stdout carries only protocol
//! frames.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use meal_planner_mcp_server::config::ServerConfig;
use meal_planner_mcp_server::logging;
use meal_planner_mcp_server::mcp::resources::ServerResources;
use meal_planner_mcp_server::mcp::server_lifecycle::ServerLifecycle;
use meal_planner_mcp_server::tools::{ToolCapabilities, ToolRegistry};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "meal-planner-mcp-server")]
#[command(about = "Low-fat, high-protein meal planner exposed as MCP tools over stdio")]
#[command(version)]
struct Args {
    /// Menu store file (overrides MENU_STORE_PATH)
    #[arg(long, value_name = "PATH", conflicts_with = "no_menu_store")]
    menu_store: Option<PathBuf>,

    /// Run without a menu store; menu tools report unavailable
    #[arg(long)]
    no_menu_store: bool,

    /// Seed for reproducible random picks (overrides MEAL_PLANNER_SEED)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(path) = self.menu_store {
            config.menu_store.path = path;
            config.menu_store.enabled = true;
        }
        if self.no_menu_store {
            config.menu_store.enabled = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Subscriber first so configuration warnings are not dropped
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    args.apply(&mut config);

    info!("Starting Meal Planner MCP Server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(&config)?);
    let registry = Arc::new(ToolRegistry::with_builtin_tools());
    info!("Tools available: {}", registry.tool_names().join(", "));
    info!("Tools writing the menu store: {}", registry.write_tools().join(", "));

    if !resources.has_menu_store() {
        let unavailable: Vec<&str> = registry
            .filter_by_capabilities(ToolCapabilities::REQUIRES_MENU_STORE)
            .into_iter()
            .map(|tool| tool.name())
            .collect();
        warn!(
            "Menu store disabled; these tools will report unavailable: {}",
            unavailable.join(", ")
        );
    }

    let lifecycle = ServerLifecycle::new(resources, registry);
    if let Err(e) = lifecycle.run_stdio_transport().await {
        error!("Stdio transport failed: {}", e);
        return Err(e);
    }

    Ok(())
}
