//! The `graph_context_search` tool: validate, retrieve, render.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, warn};

use trellis_core::errors::ProtocolError;
use trellis_core::traits::IRetriever;
use trellis_observability::{QueryLog, QueryLogEntry};

use crate::conversions::error_types::{error_code, protocol_error_json, retrieval_error_json};
use crate::conversions::request::{query_from_json, FIELD_QUERY};
use crate::conversions::response::result_to_json;
use crate::descriptor::descriptor;

pub const METHOD_DESCRIBE: &str = "describe";
pub const METHOD_CALL: &str = "call";

/// Thin adapter from JSON arguments to an [`IRetriever`]. Holds no pipeline
/// logic; every call is recorded in the query log.
pub struct RetrievalTool<R> {
    retriever: R,
    log: Mutex<QueryLog>,
}

impl<R: IRetriever> RetrievalTool<R> {
    pub fn new(retriever: R) -> Self {
        Self {
            retriever,
            log: Mutex::new(QueryLog::default()),
        }
    }

    pub fn with_log_capacity(retriever: R, capacity: usize) -> Self {
        Self {
            retriever,
            log: Mutex::new(QueryLog::with_capacity(capacity)),
        }
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn descriptor(&self) -> Value {
        descriptor()
    }

    /// Snapshot of the query log.
    pub fn query_log(&self) -> QueryLog {
        self.lock_log().clone()
    }

    /// Run one call from tool arguments. Always returns a response body,
    /// either the result or `{ "error": ... }`.
    pub async fn handle_value(&self, args: Value) -> Value {
        let started = Instant::now();
        let query_text = args
            .get(FIELD_QUERY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let response = match query_from_json(&args) {
            Ok(query) => match self.retriever.retrieve(&query).await {
                Ok(result) => result_to_json(&result),
                Err(e) => {
                    warn!(code = e.code(), stage = %e.stage, error = %e, "tool call failed");
                    retrieval_error_json(&e)
                }
            },
            Err(e) => {
                debug!(error = %e, "rejected tool arguments");
                protocol_error_json(&e)
            }
        };

        self.record(query_text, started, &response);
        response
    }

    /// [`handle_value`](Self::handle_value) over raw JSON text.
    pub async fn handle_json(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<Value>(raw) {
            Ok(args) => self.handle_value(args).await,
            Err(e) => {
                let err = ProtocolError::MalformedRequest {
                    reason: e.to_string(),
                };
                let response = protocol_error_json(&err);
                self.record(String::new(), Instant::now(), &response);
                response
            }
        };
        response.to_string()
    }

    /// Dispatch one `{ "id"?, "method", "params"? }` envelope. The reply
    /// echoes `id` and carries either `result` or `error`.
    pub async fn handle_envelope(&self, envelope: Value) -> Value {
        let id = envelope.get("id").cloned().unwrap_or(Value::Null);
        let Some(method) = envelope.get("method").and_then(Value::as_str) else {
            let err = ProtocolError::MissingField {
                field: "method".to_string(),
            };
            return reply(id, protocol_error_json(&err));
        };

        match method {
            METHOD_DESCRIBE => reply(id, json!({ "result": self.descriptor() })),
            METHOD_CALL => {
                let params = envelope.get("params").cloned().unwrap_or(Value::Null);
                let response = self.handle_value(params).await;
                if error_code(&response).is_some() {
                    reply(id, response)
                } else {
                    reply(id, json!({ "result": response }))
                }
            }
            other => {
                let err = ProtocolError::UnknownMethod {
                    method: other.to_string(),
                };
                reply(id, protocol_error_json(&err))
            }
        }
    }

    fn record(&self, query: String, started: Instant, response: &Value) {
        let latency = started.elapsed();
        let entry = match error_code(response) {
            Some(code) => QueryLogEntry::failure(query, latency, code),
            None => {
                let count = response
                    .get("results_count")
                    .and_then(Value::as_u64)
                    .unwrap_or_default();
                QueryLogEntry::success(query, latency, count as usize)
            }
        };
        self.lock_log().record(entry);
    }

    fn lock_log(&self) -> MutexGuard<'_, QueryLog> {
        // A panic while recording leaves the log usable.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Merge `id` into a `{ "result" }` or `{ "error" }` body.
fn reply(id: Value, mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), id);
    }
    body
}
