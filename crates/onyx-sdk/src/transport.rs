//! Transport layer for RPC communication

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get the JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;
}

/// Helper to deserialize a response value
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

const ZERO_ID: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Mock transport for testing.
///
/// Serves queued responses first (popped per request), then per-method canned
/// responses, then built-in defaults. Every request's method name is recorded
/// so tests can assert whether any network call happened at all.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    queued: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    requests: Arc<Mutex<Vec<String>>>,
    default_responses: Arc<HashMap<String, Value>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let empty_receipts = json!({
            "receipts": [{ "ScriptResult": { "result": "Success", "gas_used": 0 } }]
        });

        let mut defaults = HashMap::new();
        defaults.insert(
            "onyx_sendTransaction".to_string(),
            json!({
                "txId": ZERO_ID,
                "receipts": [{ "ScriptResult": { "result": "Success", "gas_used": 0 } }]
            }),
        );
        defaults.insert("onyx_simulate".to_string(), empty_receipts.clone());
        defaults.insert("onyx_dryRun".to_string(), empty_receipts);
        defaults.insert(
            "onyx_estimateFee".to_string(),
            json!({ "assetId": ZERO_ID, "amount": "0x0" }),
        );
        defaults.insert("onyx_estimateTxDependencies".to_string(), json!([]));

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            queued: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_responses: Arc::new(defaults),
        }
    }

    /// Set the canned response for a method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Queue a one-shot response for a method; queued responses are consumed
    /// before the canned one.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn queue_response(&self, method: &str, response: Value) {
        self.queued
            .lock()
            .expect("MockTransport mutex poisoned")
            .entry(method.to_string())
            .or_default()
            .push(response);
    }

    /// Method names of every request seen so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, _params: Vec<Value>) -> Result<Value, SdkError> {
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(method.to_string());

        let queued = {
            let mut queued = self
                .queued
                .lock()
                .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?;
            match queued.get_mut(method) {
                Some(values) if !values.is_empty() => Some(values.remove(0)),
                _ => None,
            }
        };
        if let Some(response) = queued {
            return Ok(response);
        }

        let canned = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();
        if let Some(response) = canned {
            return Ok(response);
        }

        if let Some(response) = self.default_responses.get(method) {
            return Ok(response.clone());
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
