//! Ripple client: the sign → submit pipeline and the shared call dispatch

use std::fmt;

use log::{info, warn};
use serde_json::{json, Value};

use crate::error::{Result, RippleError};
use crate::signing::SigningResult;
use crate::transaction::TransactionRequest;
use crate::transport::{is_empty_response, Api, HttpTransport, Transport};
use crate::types::{NodeConfig, Params};

const SEND_FOR_SERVER_PATH: &str = "/send-xrp";

/// Client for one XRP Ledger account.
///
/// Transactions go through two steps. [`Ripple::build_transaction`] asks the
/// remote signer for a signed blob and keeps it; [`Ripple::submit`] sends
/// that blob to the network. A blob is submitted at most once, and `submit`
/// without a freshly signed blob fails before anything is sent.
///
/// One client handles one transaction flow at a time. Use separate clients
/// for concurrent flows.
///
/// # Example
///
/// ```rust,no_run
/// use ripple_api::{NodeConfig, Ripple, TransactionType};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut ripple = Ripple::new("rSourceAddress...", Some("sSecret..."), NodeConfig::default())?;
///
/// let result = ripple
///     .build_transaction(|tx| {
///         tx.set_amount(0.004)
///             .set_destination_tag(1)
///             .set_destination("rDestination...")
///             .set_transaction_type(TransactionType::Payment)
///     })?
///     .submit()?;
///
/// println!("{}", result["result"]["engine_result"]);
/// # Ok(())
/// # }
/// ```
pub struct Ripple<T: Transport = HttpTransport> {
    address: String,
    secret: Option<String>,
    transport: T,
    /// Signed blob waiting for `submit`
    tx_blob: Option<String>,
}

impl Ripple<HttpTransport> {
    /// Create a client talking HTTP to the endpoints in `nodes`.
    pub fn new(address: impl Into<String>, secret: Option<&str>, nodes: NodeConfig) -> Result<Self> {
        Ok(Self::with_transport(
            address,
            secret,
            HttpTransport::new(nodes)?,
        ))
    }
}

impl<T: Transport> Ripple<T> {
    pub fn with_transport(address: impl Into<String>, secret: Option<&str>, transport: T) -> Self {
        Self {
            address: address.into(),
            secret: secret.map(str::to_string),
            transport,
            tx_blob: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Signed blob waiting to be submitted, if any.
    pub fn pending_blob(&self) -> Option<&str> {
        self.tx_blob.as_deref()
    }

    /// Build, validate and remotely sign a transaction.
    ///
    /// `configure` receives a [`TransactionRequest`] already holding this
    /// client's address and secret. It must only set fields. The request is
    /// validated locally first; nothing reaches the signer if a required
    /// field is missing.
    ///
    /// Any previously signed blob is discarded, whatever the outcome.
    ///
    /// # Errors
    /// * `RippleError::IncompleteTransaction` / `InvalidAmount` - local validation failed
    /// * `RippleError::SigningFailed` - the signer answered with a non-success status
    /// * `RippleError::MalformedResponse` - the signer's answer could not be read
    /// * `RippleError::Network` - transport failure
    pub fn build_transaction<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(TransactionRequest) -> TransactionRequest,
    {
        self.tx_blob = None;

        let mut builder = TransactionRequest::new().set_account(&self.address);
        if let Some(secret) = &self.secret {
            builder = builder.set_secret(secret);
        }
        let request = configure(builder).sign()?;

        let response = self.call("sign", "/", &request.to_params())?;

        let signing = SigningResult::from_response(&response)?;
        if let SigningResult::Rejected { status, error, .. } = &signing {
            warn!(
                "signer rejected {} for {}: {} ({})",
                request.transaction_type(),
                self.address,
                status,
                error.as_deref().unwrap_or("no error code")
            );
        }
        let tx_blob = signing.into_blob()?;

        info!("signed {} for {}", request.transaction_type(), self.address);
        self.tx_blob = Some(tx_blob);
        Ok(self)
    }

    /// Submit the blob produced by the last successful
    /// [`Ripple::build_transaction`].
    ///
    /// The response is returned as decoded; ledger engine results such as
    /// `tecNO_DST` are left for the caller to interpret. The blob is consumed
    /// even if the network rejects it.
    ///
    /// # Errors
    /// * `RippleError::NoSignedTransaction` - nothing is pending; no request is made
    /// * `RippleError::TransactionNotSent` - the node answered with an empty body
    /// * `RippleError::Network` - transport failure
    pub fn submit(&mut self) -> Result<Value> {
        let tx_blob = self
            .tx_blob
            .take()
            .ok_or(RippleError::NoSignedTransaction)?;

        let mut params = Params::new();
        params.insert("tx_blob".into(), json!(tx_blob));

        let response = self.call("submit", "/", &params)?;
        if is_empty_response(&response) {
            return Err(RippleError::TransactionNotSent("submit".to_string()));
        }

        info!(
            "submitted transaction for {}: {}",
            self.address,
            response["result"]["engine_result"]
                .as_str()
                .unwrap_or("no engine result")
        );

        Ok(response)
    }

    /// Hand signing and submission to a third-party server.
    ///
    /// Unrelated to the [`Ripple::build_transaction`] / [`Ripple::submit`]
    /// pair: the pending blob is neither read nor touched.
    pub fn send_and_submit_for_server(&self, options: &Params) -> Result<Value> {
        let response = self
            .transport
            .send_wss("POST", SEND_FOR_SERVER_PATH, options)?;

        if is_empty_response(&response) {
            return Err(RippleError::TransactionNotSent(
                SEND_FOR_SERVER_PATH.to_string(),
            ));
        }

        Ok(response)
    }

    /// HTTP verbs address the data API; anything else is a rippled method.
    pub(crate) fn call(&self, method: &str, path: &str, params: &Params) -> Result<Value> {
        let api = match method {
            "GET" | "POST" | "PUT" | "DELETE" => Api::Data,
            _ => Api::Rpc,
        };

        self.transport.send(method, path.trim(), params, api)
    }
}

impl<T: Transport> fmt::Debug for Ripple<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ripple")
            .field("address", &self.address)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("pending_blob", &self.tx_blob.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingTransport, Target};
    use crate::transaction::TransactionType;

    fn signed(blob: &str) -> Value {
        json!({ "result": { "status": "success", "tx_blob": blob } })
    }

    fn submitted() -> Value {
        json!({ "result": { "engine_result": "tesSUCCESS", "accepted": true } })
    }

    fn client(transport: RecordingTransport) -> Ripple<RecordingTransport> {
        Ripple::with_transport("rSOURCE", Some("sSECRET"), transport)
    }

    fn payment(tx: TransactionRequest) -> TransactionRequest {
        tx.set_amount(0.004)
            .set_destination_tag(1)
            .set_destination("rDEST")
            .set_transaction_type(TransactionType::Payment)
    }

    #[test]
    fn submit_without_signing_makes_no_call() {
        let mut ripple = client(RecordingTransport::new());

        let err = ripple.submit().unwrap_err();

        assert!(matches!(err, RippleError::NoSignedTransaction));
        assert_eq!(ripple.transport().call_count(), 0);
        assert!(ripple.pending_blob().is_none());
    }

    #[test]
    fn full_cycle_submits_the_signed_blob() {
        let transport = RecordingTransport::new()
            .respond_with(signed("ABCD1234"))
            .respond_with(submitted());
        let mut ripple = client(transport);

        let response = ripple.build_transaction(payment).unwrap().submit().unwrap();
        assert_eq!(response, submitted());

        let calls = ripple.transport().calls();
        assert_eq!(calls.len(), 2);

        assert_eq!(calls[0].method, "sign");
        assert_eq!(calls[0].target, Target::Rpc);
        assert_eq!(
            Value::Object(calls[0].params.clone()),
            json!({
                "secret": "sSECRET",
                "tx_json": {
                    "TransactionType": "Payment",
                    "Account": "rSOURCE",
                    "Destination": "rDEST",
                    "Amount": "4000",
                    "DestinationTag": 1,
                }
            })
        );

        assert_eq!(calls[1].method, "submit");
        assert_eq!(calls[1].path, "/");
        assert_eq!(calls[1].target, Target::Rpc);
        assert_eq!(
            Value::Object(calls[1].params.clone()),
            json!({ "tx_blob": "ABCD1234" })
        );
    }

    #[test]
    fn blob_is_consumed_by_submit() {
        let transport = RecordingTransport::new()
            .respond_with(signed("ABCD1234"))
            .respond_with(json!({ "result": { "engine_result": "tecNO_DST" } }));
        let mut ripple = client(transport);

        ripple.build_transaction(payment).unwrap();
        assert_eq!(ripple.pending_blob(), Some("ABCD1234"));

        ripple.submit().unwrap();
        assert!(ripple.pending_blob().is_none());

        assert!(matches!(
            ripple.submit(),
            Err(RippleError::NoSignedTransaction)
        ));
        assert_eq!(ripple.transport().call_count(), 2);
    }

    #[test]
    fn failed_sign_blocks_submit() {
        let transport =
            RecordingTransport::new().respond_with(json!({ "result": { "status": "failure" } }));
        let mut ripple = client(transport);

        let err = ripple.build_transaction(payment).unwrap_err();
        assert!(matches!(err, RippleError::SigningFailed { .. }));
        assert!(ripple.pending_blob().is_none());

        assert!(matches!(
            ripple.submit(),
            Err(RippleError::NoSignedTransaction)
        ));
        assert_eq!(ripple.transport().call_count(), 1);
    }

    #[test]
    fn failed_sign_discards_an_earlier_blob() {
        let transport = RecordingTransport::new()
            .respond_with(signed("AAAA"))
            .respond_with(json!({ "result": { "status": "error", "error": "badSecret" } }));
        let mut ripple = client(transport);

        ripple.build_transaction(payment).unwrap();
        assert!(ripple.build_transaction(payment).is_err());

        assert!(ripple.pending_blob().is_none());
        assert!(matches!(
            ripple.submit(),
            Err(RippleError::NoSignedTransaction)
        ));
    }

    #[test]
    fn validation_happens_before_any_call() {
        let mut ripple = client(RecordingTransport::new().respond_with(signed("ABCD")));

        let err = ripple
            .build_transaction(|tx| {
                tx.set_amount(1.0)
                    .set_transaction_type(TransactionType::Payment)
            })
            .unwrap_err();

        assert!(matches!(
            err,
            RippleError::IncompleteTransaction { field: "Destination" }
        ));
        assert_eq!(ripple.transport().call_count(), 0);
    }

    #[test]
    fn client_without_secret_cannot_sign() {
        let mut ripple = Ripple::with_transport("rSOURCE", None, RecordingTransport::new());

        let err = ripple.build_transaction(payment).unwrap_err();

        assert!(matches!(
            err,
            RippleError::IncompleteTransaction { field: "secret" }
        ));
        assert_eq!(ripple.transport().call_count(), 0);
    }

    #[test]
    fn configurator_can_override_the_secret() {
        let mut ripple = Ripple::with_transport(
            "rSOURCE",
            None,
            RecordingTransport::new().respond_with(signed("ABCD")),
        );

        ripple
            .build_transaction(|tx| payment(tx).set_secret("sOTHER"))
            .unwrap();

        assert_eq!(ripple.transport().calls()[0].params["secret"], "sOTHER");
    }

    #[test]
    fn empty_submit_response_is_not_sent() {
        let transport = RecordingTransport::new()
            .respond_with(signed("ABCD"))
            .respond_with(json!({}));
        let mut ripple = client(transport);

        let err = ripple.build_transaction(payment).unwrap().submit().unwrap_err();

        assert!(matches!(err, RippleError::TransactionNotSent(_)));
        assert!(ripple.pending_blob().is_none());
    }

    #[test]
    fn delegated_send_is_independent_of_pending_blob() {
        let transport = RecordingTransport::new()
            .respond_with(signed("ABCD"))
            .respond_with(json!({ "status": "queued" }));
        let mut ripple = client(transport);
        ripple.build_transaction(payment).unwrap();

        let mut options = Params::new();
        options.insert("amount".into(), json!("1"));
        options.insert("destination".into(), json!("rDEST"));
        let response = ripple.send_and_submit_for_server(&options).unwrap();

        assert_eq!(response, json!({ "status": "queued" }));
        assert_eq!(ripple.pending_blob(), Some("ABCD"));

        let call = &ripple.transport().calls()[1];
        assert_eq!(call.target, Target::Wss);
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/send-xrp");
        assert_eq!(call.params, options);
    }

    #[test]
    fn delegated_send_with_empty_response_fails() {
        let ripple = client(RecordingTransport::new().respond_with(json!([])));

        let err = ripple.send_and_submit_for_server(&Params::new()).unwrap_err();

        assert!(matches!(err, RippleError::TransactionNotSent(_)));
    }

    #[test]
    fn debug_hides_secret() {
        let ripple = client(RecordingTransport::new());
        let printed = format!("{ripple:?}");
        assert!(printed.contains("rSOURCE"));
        assert!(!printed.contains("sSECRET"));
    }
}
