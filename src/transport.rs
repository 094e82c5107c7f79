//! HTTP transport for the data API, the rippled JSON-RPC node and the
//! delegated send server

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{Result, RippleError};
use crate::types::{join_url, NodeConfig, Params};

/// Which base endpoint a [`Transport::send`] call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// REST data API, params become the query string
    Data,
    /// rippled JSON-RPC, params are wrapped in an [`RpcEnvelope`]
    Rpc,
}

/// Request dispatch used by [`crate::Ripple`].
///
/// Implementations decode every response with [`decode_body`] semantics, so
/// callers only ever see a JSON object, or an array for list endpoints.
/// Transport failures are returned as errors and never retried.
pub trait Transport {
    fn send(&self, method: &str, path: &str, params: &Params, api: Api) -> Result<Value>;

    /// Same as a data API call, but against the configured WSS-fronted server.
    fn send_wss(&self, method: &str, path: &str, params: &Params) -> Result<Value>;
}

/// JSON-RPC framing in rippled's dialect.
#[derive(Debug, Serialize, PartialEq)]
pub struct RpcEnvelope<'a> {
    pub id: u64,
    pub method: &'a str,
    pub json_rpc: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<&'a Params>,
}

impl<'a> RpcEnvelope<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a Params) -> Self {
        let params = if params.is_empty() {
            Vec::new()
        } else {
            vec![params]
        };

        Self {
            id,
            method,
            json_rpc: "2.0",
            params,
        }
    }
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: NodeConfig,
    request_count: AtomicU64,
}

impl HttpTransport {
    pub fn new(config: NodeConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            request_count: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Ids start at 1 and are never reused for the lifetime of the transport.
    fn next_id(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn query(&self, method: &str, url: &str, params: &Params) -> Result<Value> {
        let method = parse_method(method)?;
        debug!("{method} {url}");

        let mut request = self.client.request(method, url);
        if !params.is_empty() {
            request = request.query(&query_pairs(params));
        }

        let response = request.send()?.error_for_status()?;
        Ok(decode_body(&response.text()?))
    }

    fn rpc(&self, method: &str, url: &str, params: &Params) -> Result<Value> {
        let envelope = RpcEnvelope::new(self.next_id(), method, params);
        debug!("rpc #{} {} -> {}", envelope.id, method, url);

        let response = self
            .client
            .post(url)
            .json(&envelope)
            .send()?
            .error_for_status()?;

        Ok(decode_body(&response.text()?))
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: &str, path: &str, params: &Params, api: Api) -> Result<Value> {
        match api {
            Api::Data => self.query(method, &join_url(&self.config.data_api, path), params),
            Api::Rpc => self.rpc(method, &join_url(&self.config.rpc, path), params),
        }
    }

    fn send_wss(&self, method: &str, path: &str, params: &Params) -> Result<Value> {
        let base = self
            .config
            .wss_node
            .as_deref()
            .ok_or(RippleError::MissingWssNode)?;

        self.query(method, &join_url(base, path), params)
    }
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| RippleError::InvalidMethod(method.to_string()))
}

/// Flatten params into query pairs. Strings are sent bare, nulls are dropped,
/// everything else uses its JSON text.
fn query_pairs(params: &Params) -> Vec<(&str, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.as_str(), value)
        })
        .collect()
}

/// Decode a response body into the shape call sites index into.
///
/// - empty, non-JSON or `null` bodies become `{}`
/// - a bare boolean becomes `{"success": <bool>}`
/// - objects and arrays pass through unchanged
/// - any other scalar becomes `{}`
pub fn decode_body(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Bool(success)) => json!({ "success": success }),
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => Value::Object(Map::new()),
    }
}

/// `{}`, `[]` and `null` count as "nothing came back".
pub fn is_empty_response(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}
