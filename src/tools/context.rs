// ABOUTME: Defines ToolExecutionContext which gives tools access to shared server resources.
// ABOUTME: Carries the JSON-RPC request id for tracing alongside the resource handle.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Execution Context
//!
//! One context is built per `tools/call`. Tools reach the nutrition table,
//! planner tunables, random source, and menu store through it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::database::MenuStore;
use crate::errors::AppResult;
use crate::mcp::resources::ServerResources;

use super::errors::ToolError;

/// Context provided to every tool execution.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Shared server resources
    pub resources: Arc<ServerResources>,
    /// JSON-RPC id of the originating request
    pub request_id: Option<Value>,
}

impl ToolExecutionContext {
    /// Create a context without a request id
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            resources,
            request_id: None,
        }
    }

    /// Attach the originating request id
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<Value>) -> Self {
        self.request_id = request_id;
        self
    }

    /// The menu store, or an unavailable error naming the calling tool
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` when the server runs without a menu store
    pub fn menu_store(&self, tool_name: &str) -> AppResult<&Mutex<MenuStore>> {
        self.resources
            .menu_store
            .as_ref()
            .ok_or_else(|| ToolError::unavailable(tool_name, "menu store").into())
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("request_id", &self.request_id)
            .field("has_menu_store", &self.resources.has_menu_store())
            .finish_non_exhaustive()
    }
}
