//! Typed records for data API responses
//!
//! Responses are decoded to `serde_json::Value` by the transport and then
//! converted here. A shape mismatch is a `MalformedResponse`, never a
//! half-filled record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RippleError};

/// `account_data` from `/accounts/{address}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountObject {
    pub account: String,
    /// Account that funded this one
    pub parent: Option<String>,
    pub initial_balance: Option<String>,
    pub inception: Option<String>,
    pub ledger_index: Option<u64>,
    pub tx_hash: Option<String>,
}

/// One entry of `/accounts/{address}/payments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentObject {
    pub amount: String,
    pub delivered_amount: Option<String>,
    pub currency: String,
    pub source_currency: Option<String>,
    pub issuer: Option<String>,
    pub source: String,
    pub destination: String,
    pub source_tag: Option<u32>,
    pub destination_tag: Option<u32>,
    pub executed_time: String,
    pub ledger_index: u64,
    pub tx_index: Option<u32>,
    pub tx_hash: String,
    /// Fee burned, in XRP
    pub transaction_cost: Option<String>,
    #[serde(default)]
    pub source_balance_changes: Vec<Value>,
    #[serde(default)]
    pub destination_balance_changes: Vec<Value>,
}

/// A ledger transaction as returned by `/transactions/{hash}` and the
/// account history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionObject {
    pub hash: String,
    pub ledger_index: u64,
    pub date: String,
    #[serde(default)]
    pub tx: Map<String, Value>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl TransactionObject {
    pub fn transaction_type(&self) -> Option<&str> {
        self.tx.get("TransactionType").and_then(Value::as_str)
    }

    /// Engine result code, e.g. `tesSUCCESS`
    pub fn result(&self) -> Option<&str> {
        self.meta.get("TransactionResult").and_then(Value::as_str)
    }
}

/// Endpoints that answer with either a single record or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Convert a decoded value into `T`, naming `what` on failure.
pub(crate) fn parse_object<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| RippleError::MalformedResponse(format!("{what}: {e}")))
}

/// `response[key]`, or `MalformedResponse` if it is missing or null.
pub(crate) fn field<'a>(response: &'a Value, key: &str) -> Result<&'a Value> {
    response
        .get(key)
        .filter(|value| !value.is_null())
        .ok_or_else(|| RippleError::MalformedResponse(format!("missing `{key}` in response")))
}

pub(crate) fn parse_list<T: DeserializeOwned>(value: &Value, what: &str) -> Result<Vec<T>> {
    value
        .as_array()
        .ok_or_else(|| RippleError::MalformedResponse(format!("{what}: expected a list")))?
        .iter()
        .map(|item| parse_object(item, what))
        .collect()
}
