// ABOUTME: Defines ToolResult, the value a tool hands back to the MCP request processor.
// ABOUTME: Carries either structured JSON or a plain text message, plus an error flag.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Result Types
//!
//! Bridges tool implementations with the MCP `tools/call` response format.
//! JSON content is rendered as pretty-printed text; string content is sent
//! as-is.

use serde::Serialize;
use serde_json::Value;

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a simple successful result with just content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create a result from a serializable value
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value cannot be converted to JSON
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Create a text result (convenience method)
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Text as shown to the client
    ///
    /// # Errors
    ///
    /// Returns the serialization error if JSON content cannot be rendered
    pub fn render_text(&self) -> Result<String, serde_json::Error> {
        match &self.content {
            Value::String(text) => Ok(text.clone()),
            other => serde_json::to_string_pretty(other),
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_renders_verbatim() {
        let result = ToolResult::text("Nutrition information not found for: kale");
        assert_eq!(
            result.render_text().unwrap(),
            "Nutrition information not found for: kale"
        );
        assert!(!result.is_error);
    }

    #[test]
    fn test_json_renders_pretty() {
        let result = ToolResult::ok(json!({"count": 1}));
        assert_eq!(result.render_text().unwrap(), "{\n  \"count\": 1\n}");
    }
}
