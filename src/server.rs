//! Stdio tool host.
//!
//! Newline-delimited JSON-RPC 2.0 over stdin/stdout, covering the MCP subset
//! needed to list and call tools. Tool failures come back as results with
//! `isError: true`; only protocol failures become JSON-RPC errors.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::client::ShipxyClient;
use crate::errors::Result;
use crate::tools::{self, ToolSpec};
use crate::transport::{HttpTransport, Transport};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct Request {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

fn success(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn failure(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() },
    })
}

pub struct Server<T = HttpTransport> {
    client: ShipxyClient<T>,
    tools: Vec<ToolSpec>,
}

impl<T: Transport> Server<T> {
    pub fn new(client: ShipxyClient<T>) -> Self {
        Self {
            client,
            tools: tools::catalog(),
        }
    }

    /// Handle one incoming line; `None` when no reply is due
    pub async fn handle_message(&self, line: &str) -> Option<Value> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return Some(failure(Value::Null, PARSE_ERROR, e.to_string())),
        };
        // Absent id marks a notification; an explicit null id still gets a reply
        let id = value.get("id").cloned();

        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(failure(
                    id.unwrap_or(Value::Null),
                    INVALID_REQUEST,
                    e.to_string(),
                ))
            }
        };
        if request.jsonrpc != "2.0" {
            return Some(failure(
                id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        let Some(id) = id else {
            debug!("Notification {}", request.method);
            return None;
        };

        let reply = match request.method.as_str() {
            "initialize" => success(id, self.initialize(&request.params)),
            "ping" => success(id, json!({})),
            "tools/list" => success(id, json!({ "tools": self.tools })),
            "tools/call" => match serde_json::from_value::<CallParams>(request.params) {
                Ok(params) => success(id, self.call_tool(params).await),
                Err(e) => failure(id, INVALID_PARAMS, e.to_string()),
            },
            other => {
                warn!("Unknown method {}", other);
                failure(id, METHOD_NOT_FOUND, format!("method not found: {other}"))
            }
        };
        Some(reply)
    }

    fn initialize(&self, params: &Value) -> Value {
        let version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);
        info!("Client initialized with protocol {}", version);
        json!({
            "protocolVersion": version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    async fn call_tool(&self, params: CallParams) -> Value {
        match tools::dispatch(&self.client, &params.name, params.arguments).await {
            Ok(result) => json!({
                "content": [{ "type": "text", "text": result.to_string() }],
                "structuredContent": result,
                "isError": false,
            }),
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                json!({
                    "content": [{ "type": "text", "text": e.to_string() }],
                    "isError": true,
                })
            }
        }
    }

    /// Serve until the reader hits EOF
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_message(&line).await {
                let mut out = reply.to_string();
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("Input closed");
        Ok(())
    }

    /// Serve on the process's stdin and stdout
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.run(stdin, tokio::io::stdout()).await
    }
}
