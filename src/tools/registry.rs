// ABOUTME: Central registry for MCP tools with capability-based filtering and execution.
// ABOUTME: Provides tool discovery, feature-flag-based registration, and timed dispatch.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Central registry for MCP tools, providing:
//! - Tool registration and lookup
//! - Category and capability filtering
//! - Feature-flag-based conditional registration
//! - Schema generation for MCP tools/list responses, in registration order

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Central registry for MCP tools.
///
/// Built once at startup and then used immutably for lookups. Tools are
/// `Arc`-wrapped so executions can share them across tasks.
///
/// # Example
///
/// ```
/// use meal_planner_mcp_server::tools::registry::ToolRegistry;
///
/// let mut registry = ToolRegistry::new();
/// registry.register_builtin_tools();
/// assert!(registry.contains("suggest_meal"));
/// ```
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Names in registration order
    order: Vec<String>,
    /// Tool categories for organization
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            categories: HashMap::new(),
        }
    }

    /// Registry holding every tool enabled at compile time
    #[must_use]
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_tools();
        registry
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        true
    }

    /// Register a tool and categorize it
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) {
        let name = tool.name().to_owned();
        if self.register(tool) {
            self.categories
                .entry(category.to_owned())
                .or_default()
                .push(name);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names in registration order
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// List tool names in a specific category
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Schemas for every registered tool, in registration order
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.ordered_tools()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Filter tools by capabilities
    #[must_use]
    pub fn filter_by_capabilities(&self, required: ToolCapabilities) -> Vec<&Arc<dyn McpTool>> {
        self.ordered_tools()
            .filter(|tool| tool.capabilities().contains(required))
            .collect()
    }

    /// Names of tools that modify the menu store
    #[must_use]
    pub fn write_tools(&self) -> Vec<&str> {
        self.ordered_tools()
            .filter(|tool| tool.capabilities().writes_data())
            .map(|tool| tool.name())
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its execution fails
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;

        let started = Instant::now();
        let outcome = tool.execute(args, context).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let success = outcome.as_ref().is_ok_and(|result| !result.is_error);
        AppLogger::log_mcp_tool_call(name, success, duration_ms);
        outcome
    }

    /// Register all built-in tools based on feature flags
    pub fn register_builtin_tools(&mut self) {
        info!("Registering built-in tools...");

        #[cfg(feature = "tools-meals")]
        self.register_meal_tools();

        #[cfg(feature = "tools-menus")]
        self.register_menu_tools();

        info!("Registered {} built-in tools", self.len());
    }

    /// Register meal composition and nutrition tools
    #[cfg(feature = "tools-meals")]
    fn register_meal_tools(&mut self) {
        use super::implementations::meals::create_meal_tools;

        for tool in create_meal_tools() {
            self.register_with_category(Arc::from(tool), "meals");
        }
        debug!("Registered meal tools: {}", self.tools_in_category("meals").join(", "));
    }

    /// Register registered-menu tools
    #[cfg(feature = "tools-menus")]
    fn register_menu_tools(&mut self) {
        use super::implementations::menus::create_menu_tools;

        for tool in create_menu_tools() {
            self.register_with_category(Arc::from(tool), "menus");
        }
        debug!("Registered menu tools: {}", self.tools_in_category("menus").join(", "));
    }

    fn ordered_tools(&self) -> impl Iterator<Item = &Arc<dyn McpTool>> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .field("categories", &self.categories)
            .finish()
    }
}
