//! Read-only lookups against the data API and the rippled node
//!
//! Address arguments default to the client's own address.

use serde_json::{json, Value};

use crate::client::Ripple;
use crate::error::{Result, RippleError};
use crate::objects::{
    field, parse_list, parse_object, AccountObject, OneOrMany, PaymentObject, TransactionObject,
};
use crate::transport::Transport;
use crate::types::Params;

impl<T: Transport> Ripple<T> {
    fn or_own<'a>(&'a self, address: Option<&'a str>) -> &'a str {
        address.unwrap_or_else(|| self.address())
    }

    fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.call("GET", path, params)
    }

    fn rpc(&self, method: &str) -> Result<Value> {
        self.call(method, "/", &Params::new())
    }

    pub fn ping(&self) -> Result<Value> {
        self.rpc("ping")
    }

    pub fn server_info(&self) -> Result<Value> {
        self.rpc("server_info")
    }

    /// Random 256-bit value from the node
    pub fn random(&self) -> Result<Value> {
        self.rpc("random")
    }

    pub fn fee(&self) -> Result<Value> {
        self.rpc("fee")
    }

    /// Look a transaction up on the node by hash (`tx` method).
    pub fn verify_transaction(&self, tx_hash: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("transaction".into(), json!(tx_hash));
        self.call("tx", "/", &params)
    }

    pub fn accounts(&self, params: &Params) -> Result<Value> {
        self.get("/accounts", params)
    }

    pub fn account(&self, address: Option<&str>) -> Result<AccountObject> {
        let path = format!("/accounts/{}", self.or_own(address));
        let response = self.get(&path, &Params::new())?;
        parse_object(field(&response, "account_data")?, "account_data")
    }

    pub fn account_balances(&self, address: Option<&str>, params: &Params) -> Result<Value> {
        self.get(&format!("/accounts/{}/balances", self.or_own(address)), params)
    }

    /// Payments for an account. A response with `count == 1` is returned as
    /// a single record.
    pub fn account_payments(
        &self,
        address: Option<&str>,
        params: &Params,
    ) -> Result<OneOrMany<PaymentObject>> {
        let path = format!("/accounts/{}/payments", self.or_own(address));
        let response = self.get(&path, params)?;
        let payments = field(&response, "payments")?;

        if response["count"].as_u64() == Some(1) {
            let first = payments.get(0).ok_or_else(|| {
                RippleError::MalformedResponse("count is 1 but no payment listed".to_string())
            })?;
            return Ok(OneOrMany::One(parse_object(first, "payment")?));
        }

        Ok(OneOrMany::Many(parse_list(payments, "payments")?))
    }

    pub fn account_orders(&self, address: Option<&str>, params: &Params) -> Result<Value> {
        self.get(&format!("/account/{}/orders", self.or_own(address)), params)
    }

    pub fn account_transaction_history(
        &self,
        address: Option<&str>,
        params: &Params,
    ) -> Result<Vec<TransactionObject>> {
        let path = format!("/accounts/{}/transactions", self.or_own(address));
        let response = self.get(&path, params)?;
        parse_list(field(&response, "transactions")?, "transactions")
    }

    pub fn transaction_by_account_and_sequence(
        &self,
        address: Option<&str>,
        sequence: u32,
        params: &Params,
    ) -> Result<Value> {
        let path = format!("/accounts/{}/transactions/{}", self.or_own(address), sequence);
        self.get(&path, params)
    }

    pub fn account_transaction_stats(&self, address: Option<&str>, params: &Params) -> Result<Value> {
        self.get(&format!("/accounts/{}/stats/transactions", self.or_own(address)), params)
    }

    pub fn account_value_stats(&self, address: Option<&str>, params: &Params) -> Result<Value> {
        self.get(&format!("/accounts/{}/stats/value", self.or_own(address)), params)
    }

    /// Transaction by hash. When the API reports more than one match, all of
    /// them are returned.
    pub fn transaction(&self, hash: &str, params: &Params) -> Result<OneOrMany<TransactionObject>> {
        let response = self.get(&format!("/transactions/{hash}"), params)?;

        if response["count"].as_u64().is_some_and(|count| count > 1) {
            return Ok(OneOrMany::Many(parse_list(
                field(&response, "transactions")?,
                "transactions",
            )?));
        }

        Ok(OneOrMany::One(parse_object(
            field(&response, "transaction")?,
            "transaction",
        )?))
    }

    pub fn transactions(&self, params: &Params) -> Result<Value> {
        self.get("/transactions", params)
    }

    pub fn rippled_versions(&self) -> Result<Value> {
        self.get("/network/rippled_versions", &Params::new())
    }

    pub fn gateways(&self) -> Result<Value> {
        self.get("/gateways", &Params::new())
    }

    pub fn gateway(&self, gateway: &str) -> Result<Value> {
        self.get(&format!("/gateways/{gateway}"), &Params::new())
    }

    pub fn health_api(&self, params: &Params) -> Result<Value> {
        self.get("/health/api", params)
    }

    pub fn health_importer(&self, params: &Params) -> Result<Value> {
        self.get("/health/importer", params)
    }

    pub fn health_nodes_etl(&self, params: &Params) -> Result<Value> {
        self.get("/health/nodes_etl", params)
    }

    pub fn health_validations_etl(&self, params: &Params) -> Result<Value> {
        self.get("/health/validations_etl", params)
    }

    pub fn stats(&self, params: &Params) -> Result<Value> {
        self.get("/stats", params)
    }

    /// Rate of `currency` issued by `address` against `counter`. Defaults:
    /// `USD`, own address, `XRP`.
    pub fn exchange_rates(
        &self,
        params: &Params,
        counter: Option<&str>,
        currency: Option<&str>,
        address: Option<&str>,
    ) -> Result<Value> {
        let path = format!(
            "/exchange_rates/{}+{}/{}",
            currency.unwrap_or("USD"),
            self.or_own(address),
            counter.unwrap_or("XRP"),
        );
        self.get(&path, params)
    }
}
