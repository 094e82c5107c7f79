//! HTTP-level tests against a local mock server

use mockito::{Matcher, Server};
use serde_json::json;

use ripple_api::{Api, HttpTransport, NodeConfig, Params, Ripple, RippleError, Transport, TransactionType};

fn nodes(server: &Server) -> NodeConfig {
    NodeConfig {
        data_api: format!("{}/v2", server.url()),
        rpc: server.url(),
        wss_node: Some(server.url()),
        ..NodeConfig::default()
    }
}

#[test]
fn rpc_ids_increase_per_client() {
    let mut server = Server::new();
    let mocks: Vec<_> = (1..=3)
        .map(|id| {
            server
                .mock("POST", "/")
                .match_body(Matcher::Json(json!({ "id": id, "method": "ping", "json_rpc": "2.0" })))
                .with_header("content-type", "application/json")
                .with_body(r#"{"result":{"status":"success"}}"#)
                .expect(1)
                .create()
        })
        .collect();

    let transport = HttpTransport::new(nodes(&server)).unwrap();
    for _ in 0..3 {
        transport.send("ping", "/", &Params::new(), Api::Rpc).unwrap();
    }

    for mock in mocks {
        mock.assert();
    }
}

#[test]
fn data_api_sends_query_params() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v2/accounts/rOWN/balances")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("currency".into(), "USD".into()),
        ]))
        .with_body(r#"{"result":"success","balances":[]}"#)
        .create();

    let ripple = Ripple::new("rOWN", None, nodes(&server)).unwrap();
    let mut params = Params::new();
    params.insert("limit".into(), json!(5));
    params.insert("currency".into(), json!("USD"));

    let response = ripple.account_balances(None, &params).unwrap();

    mock.assert();
    assert_eq!(response, json!({ "result": "success", "balances": [] }));
}

#[test]
fn bodies_are_coerced() {
    let mut server = Server::new();
    let _boolean = server.mock("GET", "/v2/health/api").with_body("true").create();
    let _html = server
        .mock("GET", "/v2/health/importer")
        .with_body("<html>oops</html>")
        .create();
    let _list = server
        .mock("GET", "/v2/gateways")
        .with_body(r#"[{"name":"Bitstamp"}]"#)
        .create();

    let ripple = Ripple::new("rOWN", None, nodes(&server)).unwrap();

    assert_eq!(ripple.health_api(&Params::new()).unwrap(), json!({ "success": true }));
    assert_eq!(ripple.health_importer(&Params::new()).unwrap(), json!({}));
    assert_eq!(ripple.gateways().unwrap(), json!([{ "name": "Bitstamp" }]));
}

#[test]
fn server_errors_propagate() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/").with_status(503).create();

    let ripple = Ripple::new("rOWN", None, nodes(&server)).unwrap();

    assert!(matches!(ripple.server_info(), Err(RippleError::Network(_))));
}

#[test]
fn payment_is_signed_then_submitted() {
    let mut server = Server::new();
    let sign = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "id": 1,
            "method": "sign",
            "json_rpc": "2.0",
            "params": [{
                "secret": "sSECRET",
                "tx_json": {
                    "TransactionType": "Payment",
                    "Account": "rSOURCE",
                    "Destination": "rDEST",
                    "Amount": "4000",
                    "DestinationTag": 1
                }
            }]
        })))
        .with_body(r#"{"result":{"status":"success","tx_blob":"ABCD1234"}}"#)
        .expect(1)
        .create();
    let submit = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "id": 2,
            "method": "submit",
            "json_rpc": "2.0",
            "params": [{ "tx_blob": "ABCD1234" }]
        })))
        .with_body(r#"{"result":{"engine_result":"tesSUCCESS","accepted":true}}"#)
        .expect(1)
        .create();

    let mut ripple = Ripple::new("rSOURCE", Some("sSECRET"), nodes(&server)).unwrap();
    let response = ripple
        .build_transaction(|tx| {
            tx.set_amount(0.004)
                .set_destination_tag(1)
                .set_destination("rDEST")
                .set_transaction_type(TransactionType::Payment)
        })
        .unwrap()
        .submit()
        .unwrap();

    sign.assert();
    submit.assert();
    assert_eq!(response["result"]["engine_result"], "tesSUCCESS");
}

#[test]
fn submit_without_sign_never_hits_the_network() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/").expect(0).create();

    let mut ripple = Ripple::new("rSOURCE", Some("sSECRET"), nodes(&server)).unwrap();

    assert!(matches!(ripple.submit(), Err(RippleError::NoSignedTransaction)));
    mock.assert();
}

#[test]
fn rejected_signature_is_reported() {
    let mut server = Server::new();
    let _sign = server
        .mock("POST", "/")
        .with_body(
            r#"{"result":{"status":"error","error":"badSecret","error_message":"Secret does not match account."}}"#,
        )
        .create();

    let mut ripple = Ripple::new("rSOURCE", Some("sWRONG"), nodes(&server)).unwrap();
    let err = ripple
        .build_transaction(|tx| {
            tx.set_amount(1.0)
                .set_destination("rDEST")
                .set_transaction_type(TransactionType::Payment)
        })
        .unwrap_err();

    match err {
        RippleError::SigningFailed { status, message } => {
            assert_eq!(status, "error");
            assert_eq!(message, "Secret does not match account.");
        }
        other => panic!("expected SigningFailed, got {other:?}"),
    }
    assert!(ripple.pending_blob().is_none());
}

#[test]
fn delegated_send_posts_options_as_query() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/send-xrp")
        .match_query(Matcher::UrlEncoded("destination".into(), "rDEST".into()))
        .with_body(r#"{"hash":"ABC"}"#)
        .expect(1)
        .create();

    let ripple = Ripple::new("rSOURCE", None, nodes(&server)).unwrap();
    let mut options = Params::new();
    options.insert("destination".into(), json!("rDEST"));

    let response = ripple.send_and_submit_for_server(&options).unwrap();

    mock.assert();
    assert_eq!(response, json!({ "hash": "ABC" }));
}

#[test]
fn delegated_send_with_empty_body_is_not_sent() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/send-xrp").with_body("").create();

    let ripple = Ripple::new("rSOURCE", None, nodes(&server)).unwrap();

    assert!(matches!(
        ripple.send_and_submit_for_server(&Params::new()),
        Err(RippleError::TransactionNotSent(_))
    ));
}
