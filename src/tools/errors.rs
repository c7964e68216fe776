// ABOUTME: Defines tool-specific error types for the pluggable tools architecture.
// ABOUTME: Provides structured errors that integrate with the main AppError system.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Error Types
//!
//! `ToolError` covers registry lookups and argument decoding. Each variant
//! converts into `AppError` with a matching `ErrorCode`.

use std::error::Error;
use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// Errors specific to tool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
    /// A collaborator the tool depends on is not configured
    Unavailable {
        /// Name of the tool
        tool_name: String,
        /// What is missing
        resource: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an "unavailable collaborator" error
    #[must_use]
    pub fn unavailable(tool_name: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::Unavailable {
            tool_name: tool_name.into(),
            resource: resource.into(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. }
            | Self::Unavailable { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => {
                write!(f, "Unknown tool: {tool_name}")
            }
            Self::InvalidParameter {
                tool_name,
                parameter,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter '{parameter}' for tool '{tool_name}': {reason}"
                )
            }
            Self::MissingParameter {
                tool_name,
                parameter,
            } => {
                write!(
                    f,
                    "Missing required parameter '{parameter}' for tool '{tool_name}'"
                )
            }
            Self::Unavailable {
                tool_name,
                resource,
            } => {
                write!(f, "Tool '{tool_name}' is unavailable: {resource} not available")
            }
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let code = match &error {
            ToolError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ToolError::InvalidParameter { .. } => ErrorCode::InvalidInput,
            ToolError::MissingParameter { .. } => ErrorCode::MissingRequiredField,
            ToolError::Unavailable { .. } => ErrorCode::ResourceUnavailable,
        };
        Self::new(code, error.to_string())
    }
}
