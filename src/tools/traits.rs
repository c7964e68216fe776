// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! Every tool exposed over MCP implements [`McpTool`]: static metadata
//! (name, description, input schema), capability flags, and an async
//! `execute` that receives the raw JSON arguments.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads data (nutrition table, registered menus)
        const READS_DATA = 0b0000_0001;
        /// Tool writes/modifies the menu store
        const WRITES_DATA = 0b0000_0010;
        /// Tool composes meals or plans
        const MEAL_PLANNING = 0b0000_0100;
        /// Tool manages registered menus
        const MENUS = 0b0000_1000;
        /// Tool needs a configured menu store
        const REQUIRES_MENU_STORE = 0b0001_0000;
        /// Tool output depends on the random source
        const RANDOMIZED = 0b0010_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool reads data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool writes data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Check if tool cannot run without a menu store
    #[must_use]
    pub const fn requires_menu_store(self) -> bool {
        self.contains(Self::REQUIRES_MENU_STORE)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
            (Self::MEAL_PLANNING, "meal_planning"),
            (Self::MENUS, "menus"),
            (Self::REQUIRES_MENU_STORE, "requires_menu_store"),
            (Self::RANDOMIZED, "randomized"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are `Send + Sync` so the registry can share them behind `Arc`.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used in `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned in `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and validation
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for validation failures, missing collaborators, or execution errors
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
