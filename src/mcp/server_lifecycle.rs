// ABOUTME: Server lifecycle management for the stdio MCP transport
// ABOUTME: Reads newline-delimited JSON-RPC frames and writes one response line per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::jsonrpc::JsonRpcResponse;
use crate::tools::ToolRegistry;

use super::mcp_request_processor::McpRequestProcessor;
use super::resources::ServerResources;

/// Manages server startup and the stdio transport
pub struct ServerLifecycle {
    processor: McpRequestProcessor,
}

impl ServerLifecycle {
    /// Create a lifecycle manager over shared resources and a built registry
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            processor: McpRequestProcessor::new(resources, registry),
        }
    }

    /// Run stdio transport for MCP communication until stdin closes
    ///
    /// # Errors
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run_stdio_transport(self) -> Result<()> {
        let stdout = Arc::new(Mutex::new(io::stdout()));
        info!("MCP stdio transport started");
        self.serve(BufReader::new(io::stdin()), &stdout).await?;
        info!("stdin closed, MCP stdio transport stopped");
        Ok(())
    }

    /// Process frames from `reader` until EOF, writing responses to `writer`
    ///
    /// Blank lines are skipped. Requests are handled strictly one at a time.
    ///
    /// # Errors
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, writer: &Arc<Mutex<W>>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.processor.handle_frame(&line).await {
                Self::write_response(&response, writer).await?;
            }
        }
        Ok(())
    }

    /// Write MCP response as one line
    async fn write_response<W>(response: &JsonRpcResponse, writer: &Arc<Mutex<W>>) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let response_json = serde_json::to_string(response)?;
        debug!("Sending MCP response: {}", response_json);

        let mut writer_lock = writer.lock().await;
        writer_lock.write_all(response_json.as_bytes()).await?;
        writer_lock.write_all(b"\n").await?;
        writer_lock.flush().await?;
        drop(writer_lock);

        Ok(())
    }
}
