// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Defines initialize, tools/list, and tools/call payloads plus JSON Schema builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the MCP messages this server exchanges, and the
//! JSON Schema subset tools use to describe their inputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol::SERVER_INSTRUCTIONS;

/// Server Information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input parameter schema
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition for a tool's arguments object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always "object" for tool inputs
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Names of required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema from `(name, property)` pairs and required names
    #[must_use]
    pub fn object(properties: Vec<(&str, PropertySchema)>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_owned(), schema))
                    .collect(),
            ),
            required: (!required.is_empty())
                .then(|| required.iter().map(|name| (*name).to_owned()).collect()),
        }
    }

    /// Property schema by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Whether a property is listed as required
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|field| field == name))
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description for clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed string values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Default value applied when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Element schema for arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    /// Nested properties for objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required nested properties for objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl PropertySchema {
    fn typed(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            ..Self::default()
        }
    }

    /// String property
    #[must_use]
    pub fn string(description: &str) -> Self {
        Self::typed("string", description)
    }

    /// Number property
    #[must_use]
    pub fn number(description: &str) -> Self {
        Self::typed("number", description)
    }

    /// Integer property
    #[must_use]
    pub fn integer(description: &str) -> Self {
        Self::typed("integer", description)
    }

    /// Boolean property
    #[must_use]
    pub fn boolean(description: &str) -> Self {
        Self::typed("boolean", description)
    }

    /// Array of strings
    #[must_use]
    pub fn string_array(description: &str) -> Self {
        Self {
            items: Some(Box::new(Self::typed("string", ""))),
            ..Self::typed("array", description)
        }
    }

    /// Nested object
    #[must_use]
    pub fn object(description: &str, properties: Vec<(&str, Self)>, required: &[&str]) -> Self {
        let nested = JsonSchema::object(properties, required);
        Self {
            properties: nested.properties,
            required: nested.required,
            ..Self::typed("object", description)
        }
    }

    /// Restrict to a fixed set of strings
    #[must_use]
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|value| (*value).to_owned()).collect());
        self
    }

    /// Inclusive lower bound
    #[must_use]
    pub const fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Inclusive bounds
    #[must_use]
    pub const fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Default value
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Tool Call for executing a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Tool Response after execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Response content items
    pub content: Vec<Content>,
    /// Whether the tool reported an error
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Single text item response
    #[must_use]
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error,
        }
    }
}

/// Content types for MCP messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text
    #[serde(rename = "text")]
    Text {
        /// Text body
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server emits list-changed notifications
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Complete MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Usage hints for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Create a new initialize response with current server configuration
    #[must_use]
    pub fn new(protocol_version: String, server_name: String, server_version: String) -> Self {
        Self {
            protocol_version,
            server_info: ServerInfo {
                name: server_name,
                version: server_version,
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_owned()),
        }
    }
}

/// Initialize Request from client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// Protocol version the client wants
    #[serde(rename = "protocolVersion", default)]
    pub protocol_version: Option<String>,
    /// Client identity
    #[serde(rename = "clientInfo", default)]
    pub client_info: Option<ClientInfo>,
    /// Client capabilities, unused by this server
    #[serde(default)]
    pub capabilities: Option<Value>,
}

/// Client Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client name
    pub name: String,
    /// Client version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_schema_serializes_constraints() {
        let schema = PropertySchema::number("Target calories").with_range(100.0, 1500.0);
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            encoded,
            json!({"type": "number", "description": "Target calories", "minimum": 100.0, "maximum": 1500.0})
        );
    }

    #[test]
    fn test_object_schema_omits_empty_required() {
        let schema = JsonSchema::object(vec![("q", PropertySchema::string("query"))], &[]);
        assert!(schema.required.is_none());
        assert!(!schema.is_required("q"));
        assert!(schema.property("q").is_some());
    }
}
