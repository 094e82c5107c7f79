//! Transaction builder and the signing request it finalizes into

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Result, RippleError};
use crate::types::Params;

const DROPS_PER_XRP: f64 = 1_000_000.0;
/// 10^17 drops, the total XRP supply
const MAX_DROPS: u64 = 100_000_000_000_000_000;

/// Ledger transaction kinds the builder knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Payment,
    AccountSet,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "Payment",
            TransactionType::AccountSet => "AccountSet",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount to deliver: native XRP, or an issued token over a trust line.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Whole XRP, sent as a drops string
    Xrp(f64),
    Issued {
        value: String,
        currency: String,
        issuer: String,
    },
}

impl Amount {
    fn to_wire(&self) -> Result<Value> {
        match self {
            Amount::Xrp(xrp) => {
                if !xrp.is_finite() || *xrp < 0.0 {
                    return Err(RippleError::InvalidAmount(format!(
                        "{xrp} XRP is not a non-negative number"
                    )));
                }
                let drops = (xrp * DROPS_PER_XRP).round();
                if drops > MAX_DROPS as f64 {
                    return Err(RippleError::InvalidAmount(format!(
                        "{xrp} XRP exceeds the maximum of 10^17 drops"
                    )));
                }
                Ok(Value::String((drops as u64).to_string()))
            }
            Amount::Issued {
                value,
                currency,
                issuer,
            } => {
                let parsed = value
                    .parse::<f64>()
                    .map_err(|e| RippleError::InvalidAmount(format!("{value}: {e}")))?;
                if !parsed.is_finite() || parsed < 0.0 {
                    return Err(RippleError::InvalidAmount(format!(
                        "{value} is not a non-negative number"
                    )));
                }
                if currency.trim().is_empty() {
                    return Err(RippleError::IncompleteTransaction { field: "currency" });
                }
                if issuer.trim().is_empty() {
                    return Err(RippleError::IncompleteTransaction { field: "issuer" });
                }

                Ok(json!({
                    "currency": currency,
                    "issuer": issuer,
                    "value": value,
                }))
            }
        }
    }
}

/// Fluent builder for a transaction that will be signed remotely.
///
/// Setters never validate. Everything is checked in [`TransactionRequest::sign`],
/// which runs before any network call.
///
/// ```
/// use ripple_api::{TransactionRequest, TransactionType};
///
/// let request = TransactionRequest::new()
///     .set_account("rSOURCE")
///     .set_secret("sSECRET")
///     .set_transaction_type(TransactionType::Payment)
///     .set_amount(0.004)
///     .set_destination("rDEST")
///     .set_destination_tag(1)
///     .sign()
///     .unwrap();
///
/// assert_eq!(request.tx_json()["Amount"], "4000");
/// ```
#[derive(Clone, Default)]
pub struct TransactionRequest {
    account: Option<String>,
    secret: Option<String>,
    transaction_type: Option<TransactionType>,
    amount: Option<Amount>,
    destination: Option<String>,
    destination_tag: Option<u32>,
    fee: Option<u64>,
    source_tag: Option<u32>,
}

impl TransactionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount in whole XRP.
    pub fn set_amount(mut self, xrp: f64) -> Self {
        self.amount = Some(Amount::Xrp(xrp));
        self
    }

    /// Amount of an issued token. A trust line must exist between the
    /// destination and the issuer.
    pub fn set_issued_amount(
        mut self,
        value: impl Into<String>,
        currency: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        self.amount = Some(Amount::Issued {
            value: value.into(),
            currency: currency.into(),
            issuer: issuer.into(),
        });
        self
    }

    pub fn set_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn set_destination_tag(mut self, tag: u32) -> Self {
        self.destination_tag = Some(tag);
        self
    }

    pub fn set_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn set_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn set_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Fee in drops. Left to the signer when unset.
    pub fn set_fee(mut self, drops: u64) -> Self {
        self.fee = Some(drops);
        self
    }

    pub fn set_source_tag(mut self, tag: u32) -> Self {
        self.source_tag = Some(tag);
        self
    }

    /// Validate the accumulated fields and produce the request for the
    /// remote signer. No signature is computed here.
    ///
    /// Calling this more than once returns equal snapshots.
    pub fn sign(&self) -> Result<SignRequest> {
        let account = required(&self.account, "Account")?;
        let secret = required(&self.secret, "secret")?;
        let transaction_type = self
            .transaction_type
            .ok_or(RippleError::IncompleteTransaction {
                field: "TransactionType",
            })?;

        let mut tx_json = Map::new();
        tx_json.insert("TransactionType".into(), json!(transaction_type.as_str()));
        tx_json.insert("Account".into(), json!(account));

        match transaction_type {
            TransactionType::Payment => {
                let destination = required(&self.destination, "Destination")?;
                let amount = self
                    .amount
                    .as_ref()
                    .ok_or(RippleError::IncompleteTransaction { field: "Amount" })?;

                tx_json.insert("Destination".into(), json!(destination));
                tx_json.insert("Amount".into(), amount.to_wire()?);
                if let Some(tag) = self.destination_tag {
                    tx_json.insert("DestinationTag".into(), json!(tag));
                }
            }
            TransactionType::AccountSet => {}
        }

        if let Some(fee) = self.fee {
            tx_json.insert("Fee".into(), json!(fee.to_string()));
        }
        if let Some(tag) = self.source_tag {
            tx_json.insert("SourceTag".into(), json!(tag));
        }

        Ok(SignRequest {
            transaction_type,
            secret: secret.to_string(),
            tx_json,
        })
    }
}

impl fmt::Debug for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionRequest")
            .field("account", &self.account)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("transaction_type", &self.transaction_type)
            .field("amount", &self.amount)
            .field("destination", &self.destination)
            .field("destination_tag", &self.destination_tag)
            .field("fee", &self.fee)
            .field("source_tag", &self.source_tag)
            .finish()
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RippleError::IncompleteTransaction { field }),
    }
}

/// Validated, immutable input for rippled's `sign` method.
#[derive(Clone, PartialEq)]
pub struct SignRequest {
    transaction_type: TransactionType,
    secret: String,
    tx_json: Map<String, Value>,
}

impl SignRequest {
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn tx_json(&self) -> &Map<String, Value> {
        &self.tx_json
    }

    /// `{"secret": ..., "tx_json": {...}}`, the single params object of a
    /// `sign` call.
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("secret".into(), json!(self.secret));
        params.insert("tx_json".into(), Value::Object(self.tx_json.clone()));
        params
    }
}

impl fmt::Debug for SignRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignRequest")
            .field("transaction_type", &self.transaction_type)
            .field("secret", &"<redacted>")
            .field("tx_json", &self.tx_json)
            .finish()
    }
}
