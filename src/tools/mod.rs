// ABOUTME: Pluggable MCP tools: trait, registry, execution context, results, and errors.
// ABOUTME: Concrete tools live under implementations/, grouped by feature-flagged category.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools Module
//!
//! Tools implement [`McpTool`] and are registered once in a [`ToolRegistry`].
//! The MCP request processor dispatches `tools/call` through the registry
//! with a fresh [`ToolExecutionContext`].

/// Per-call access to shared resources
pub mod context;
/// Tool-specific errors
pub mod errors;
/// Concrete tools
pub mod implementations;
/// Registration and dispatch
pub mod registry;
/// Tool return values
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
