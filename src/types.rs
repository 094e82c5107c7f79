//! Type definitions shared across the client: networks, endpoint configuration
//! and request parameters.

use std::env;
use std::time::Duration;

use log::warn;
use serde_json::{Map, Value};

/// Public data API (REST, v2)
pub const DEFAULT_DATA_API_URL: &str = "https://data.ripple.com/v2";
/// Public rippled JSON-RPC node
pub const DEFAULT_RPC_URL: &str = "https://s1.ripple.com:51234";
/// Testnet rippled JSON-RPC node
pub const TESTNET_RPC_URL: &str = "https://s.altnet.rippletest.net:51234";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Query or JSON-RPC parameters. At most one such object is sent per call.
pub type Params = Map<String, Value>;

/// XRP Ledger network configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Network {
    /// Mainnet (production)
    Mainnet,
    /// Testnet (development)
    Testnet,
    /// Custom rippled node URL
    Custom(String),
}

impl Network {
    pub fn rpc_url(&self) -> &str {
        match self {
            Network::Mainnet => DEFAULT_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
            Network::Custom(url) => url,
        }
    }
}

/// Base URLs and HTTP settings used by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// REST data API base, e.g. `https://data.ripple.com/v2`
    pub data_api: String,
    /// rippled JSON-RPC base
    pub rpc: String,
    /// Third-party server used by delegated sends. Only needed for
    /// `send_and_submit_for_server`.
    pub wss_node: Option<String>,
    pub timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_api: DEFAULT_DATA_API_URL.to_string(),
            rpc: DEFAULT_RPC_URL.to_string(),
            wss_node: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl NodeConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            rpc: network.rpc_url().to_string(),
            ..Self::default()
        }
    }

    pub fn with_wss_node(mut self, url: impl Into<String>) -> Self {
        self.wss_node = Some(url.into());
        self
    }

    /// Build a configuration from `RIPPLE_DATA_API_URL`, `RIPPLE_RPC_URL`,
    /// `RIPPLE_WSS_NODE` and `RIPPLE_TIMEOUT_SECS`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("RIPPLE_DATA_API_URL") {
            config.data_api = url;
        }
        if let Ok(url) = env::var("RIPPLE_RPC_URL") {
            config.rpc = url;
        }
        if let Ok(url) = env::var("RIPPLE_WSS_NODE") {
            config.wss_node = Some(url);
        }
        if let Ok(secs) = env::var("RIPPLE_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => warn!("ignoring RIPPLE_TIMEOUT_SECS={secs}: {e}"),
            }
        }

        config
    }
}

/// Join a base URL and an API path without doubling the separator.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
