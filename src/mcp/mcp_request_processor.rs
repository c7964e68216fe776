// ABOUTME: MCP request processing and protocol handling for the stdio server
// ABOUTME: Validates, routes, and executes MCP protocol requests with proper error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Request Processor
//!
//! Routes one JSON-RPC frame at a time:
//!
//! - `initialize`, `ping`, `tools/list`, `tools/call` produce responses
//! - notifications (no `id`, or `notifications/*`) produce none
//! - anything else is `-32601`
//!
//! Tool failures are reported inside a successful `tools/call` response with
//! `isError: true`; only protocol problems become JSON-RPC errors.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::constants::protocol::{MCP_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS};
use crate::constants::service_names::MEAL_PLANNER_MCP_SERVER;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::tools::{ToolExecutionContext, ToolRegistry};

use super::resources::ServerResources;
use super::schema::{InitializeRequest, InitializeResponse, ToolCall, ToolResponse};

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
    registry: Arc<ToolRegistry>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            resources,
            registry,
        }
    }

    /// Handle one raw frame; unparseable input yields a `-32700` response with a null id
    pub async fn handle_frame(&self, frame: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(frame) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse MCP request: {}", e);
                Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        }
    }

    /// Handle an MCP request and return a response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            "Received MCP request"
        );

        if request.is_notification() || request.method.starts_with("notifications/") {
            Self::handle_notification(&request);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = if request.jsonrpc == JSONRPC_VERSION {
            self.route(request).await
        } else {
            JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                    request.jsonrpc
                ),
            )
        };

        Self::log_completion("request", start_time);
        Some(response)
    }

    async fn route(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => Self::handle_unknown_method(request),
        }
    }

    /// Handle MCP initialize request
    fn handle_initialize(request: JsonRpcRequest) -> JsonRpcResponse {
        let requested = request
            .params
            .and_then(|params| serde_json::from_value::<InitializeRequest>(params).ok())
            .and_then(|init| init.protocol_version);

        let protocol_version = match requested {
            Some(version) if SUPPORTED_PROTOCOL_VERSIONS.contains(&version.as_str()) => version,
            other => {
                if let Some(version) = other {
                    debug!(
                        "Client requested unsupported protocol {}, offering {}",
                        version, MCP_PROTOCOL_VERSION
                    );
                }
                MCP_PROTOCOL_VERSION.to_owned()
            }
        };

        let response = InitializeResponse::new(
            protocol_version,
            MEAL_PLANNER_MCP_SERVER.to_owned(),
            env!("CARGO_PKG_VERSION").to_owned(),
        );
        Self::serialized(request.id, &response)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id,
            json!({ "tools": self.registry.list_schemas() }),
        )
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let call = match request
            .params
            .map(serde_json::from_value::<ToolCall>)
            .transpose()
        {
            Ok(Some(call)) => call,
            Ok(None) => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters for tools/call",
                )
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call parameters: {e}"),
                )
            }
        };

        if !self.registry.contains(&call.name) {
            warn!("Unknown tool requested: {}", call.name);
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", call.name),
            );
        }

        let context =
            ToolExecutionContext::new(Arc::clone(&self.resources)).with_request_id(request.id.clone());
        let arguments = call.arguments.unwrap_or(Value::Null);

        let tool_response = match self.registry.execute(&call.name, arguments, &context).await {
            Ok(result) => match result.render_text() {
                Ok(text) => ToolResponse::text(text, result.is_error),
                Err(e) => {
                    error!("Failed to render result of tool {}: {}", call.name, e);
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INTERNAL_ERROR,
                        format!("Failed to render tool result: {e}"),
                    );
                }
            },
            Err(e) => {
                if e.code.is_validation() {
                    debug!("Tool {} rejected arguments: {}", call.name, e);
                } else {
                    error!("Tool {} failed: {} ({})", call.name, e, e.code);
                }
                ToolResponse::text(e.message, true)
            }
        };

        Self::serialized(request.id, &tool_response)
    }

    /// Handle unknown method
    fn handle_unknown_method(request: JsonRpcRequest) -> JsonRpcResponse {
        warn!("Unknown MCP method: {}", request.method);
        JsonRpcResponse::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )
    }

    /// Handle notification (no response required)
    fn handle_notification(request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client finished initialization"),
            "notifications/cancelled" => debug!("Request cancelled notification received"),
            other => debug!("Unknown notification type: {}", other),
        }
    }

    fn serialized<T: Serialize>(id: Option<Value>, payload: &T) -> JsonRpcResponse {
        match serde_json::to_value(payload) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                error!("Failed to serialize MCP response: {}", e);
                JsonRpcResponse::error(
                    id,
                    error_codes::INTERNAL_ERROR,
                    format!("Internal server error: {e}"),
                )
            }
        }
    }

    /// Log request completion with timing
    fn log_completion(request_type: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP {} processing", request_type
        );
    }
}
