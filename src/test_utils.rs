//! Test utilities
//!
//! An in-memory [`Transport`] that records every call and replays queued
//! responses, so pipeline behavior can be checked without a network.
//!
//! Only compiled for tests or with the `test_utils` feature.

#![cfg(any(test, feature = "test_utils"))]

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::transport::{Api, Transport};
use crate::types::Params;

/// Endpoint a recorded call was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Data,
    Rpc,
    Wss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub params: Params,
    pub target: Target,
}

/// Replays queued responses in order; once the queue is drained every call
/// answers `{}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: RefCell<VecDeque<Value>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Value) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, method: &str, path: &str, params: &Params, target: Target) -> Value {
        self.calls.borrow_mut().push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            params: params.clone(),
            target,
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

impl Transport for RecordingTransport {
    fn send(&self, method: &str, path: &str, params: &Params, api: Api) -> Result<Value> {
        let target = match api {
            Api::Data => Target::Data,
            Api::Rpc => Target::Rpc,
        };
        Ok(self.record(method, path, params, target))
    }

    fn send_wss(&self, method: &str, path: &str, params: &Params) -> Result<Value> {
        Ok(self.record(method, path, params, Target::Wss))
    }
}
