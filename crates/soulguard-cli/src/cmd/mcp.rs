//! MCP stdio server hosting the verified identity.
//!
//! The startup gate runs before the first request is read: if the on-disk
//! soul fails verification the server logs the integrity diagnostic and
//! refuses to serve tool calls at all.

use crate::tools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use soulguard_core::startup::{self, VerifiedSoul};
use std::io::{BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 protocol types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ToolContent {
    r#type: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ToolCallResult {
    content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    is_error: bool,
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

pub fn run(root: &Path) -> anyhow::Result<()> {
    // Startup gate — precondition for serving, evaluated exactly once.
    let soul = startup::verify(root).inspect_err(|e| {
        tracing::error!("{e}");
    })?;
    tracing::info!(
        "soul '{}' verified ({}), serving tools",
        soul.name(),
        soul.digest()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let tools = tools::all_tools();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let resp = JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32700,
                        message: format!("parse error: {e}"),
                    }),
                };
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &resp)?;
                writeln!(out)?;
                continue;
            }
        };

        // Notifications have no "id" key — do not respond
        if !raw
            .as_object()
            .map(|o| o.contains_key("id"))
            .unwrap_or(false)
        {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => {
                let resp = JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32600,
                        message: format!("invalid request: {e}"),
                    }),
                };
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &resp)?;
                writeln!(out)?;
                continue;
            }
        };

        let response = handle_request(&request, &tools, &soul);
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Request dispatch (pub for unit tests)
// ---------------------------------------------------------------------------

pub fn handle_request(
    req: &JsonRpcRequest,
    tools: &[Box<dyn tools::SoulTool>],
    soul: &VerifiedSoul,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => JsonRpcResponse {
            jsonrpc: "2.0",
            id: req.id.clone(),
            result: Some(serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "soulguard",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            error: None,
        },

        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: req.id.clone(),
                result: Some(serde_json::json!({ "tools": tool_list })),
                error: None,
            }
        }

        "tools/call" => {
            let params = match &req.params {
                Some(p) => p,
                None => {
                    return JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "missing params".to_string(),
                        }),
                    };
                }
            };

            let tool_name = match params["name"].as_str() {
                Some(n) => n,
                None => {
                    return JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "missing tool name in params".to_string(),
                        }),
                    };
                }
            };

            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match tools.iter().find(|t| t.name() == tool_name) {
                None => JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: req.id.clone(),
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32601,
                        message: format!("tool not found: {tool_name}"),
                    }),
                },
                Some(tool) => {
                    let (text, is_error) = match tool.call(args, soul) {
                        Ok(v) => (
                            serde_json::to_string_pretty(&v)
                                .unwrap_or_else(|e| format!("serialization error: {e}")),
                            false,
                        ),
                        Err(e) => (e, true),
                    };

                    let call_result = ToolCallResult {
                        content: vec![ToolContent {
                            r#type: "text",
                            text,
                        }],
                        is_error,
                    };

                    JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: Some(
                            serde_json::to_value(&call_result)
                                .unwrap_or_else(|e| serde_json::json!({"error": e.to_string()})),
                        ),
                        error: None,
                    }
                }
            }
        }

        other => JsonRpcResponse {
            jsonrpc: "2.0",
            id: req.id.clone(),
            result: None,
            error: Some(JsonRpcError {
                code: -32601,
                message: format!("method not found: {other}"),
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
