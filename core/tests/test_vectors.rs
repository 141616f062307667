//! Verify client operations against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector names an operation and its inputs, the request the client
//! should send, the response the transport replays, and either the expected
//! result or the expected error kind. Results are compared as parsed JSON.

use std::cell::RefCell;

use pharmvar_core::{
    ClientConfig, Error, HttpMethod, HttpRequest, HttpResponse, PharmVarClient, Transport, TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "https://www.pharmvar.org/api-service";

/// Replays the vector's simulated response and records the request.
struct Replay {
    response: Option<HttpResponse>,
    seen: RefCell<Vec<HttpRequest>>,
}

impl Transport for Replay {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.response
            .clone()
            .ok_or_else(|| "vector has no simulated response".into())
    }
}

/// What an operation produced, flattened to JSON for comparison.
fn run(client: &PharmVarClient<&Replay>, case: &Value) -> Result<Value, Error> {
    let input = &case["input"];
    let arg = |key: &str| input[key].as_str();
    let ids = |variants: pharmvar_core::VariantCollection| {
        Value::from(
            variants
                .iter()
                .map(|v| Value::from(v.variant_id.clone()))
                .collect::<Vec<_>>(),
        )
    };

    match case["operation"].as_str().unwrap() {
        "all" => client.all_variants().map(ids),
        "gene" => client.variants_by_gene(arg("symbol").unwrap()).map(ids),
        "allele" => client.variants_by_allele(arg("identifier").unwrap()).map(ids),
        "rsid" => client.variants_by_rsid(arg("rs_id").unwrap()).map(ids),
        "spdi" => client.variants_by_spdi(arg("spdi").unwrap()).map(ids),
        "impact" => client.variant_impact(arg("rs_id"), arg("spdi")).map(Value::from),
        "frequency" => client.variant_frequency(arg("rs_id"), arg("spdi")).map(Value::from),
        other => panic!("unknown operation: {other}"),
    }
}

fn error_name(err: &Error) -> &'static str {
    match err {
        Error::InvalidArgument(_) => "InvalidArgument",
        Error::Transport { .. } => "Transport",
        Error::BadResponseBody { .. } => "BadResponseBody",
        Error::Api { .. } => "Api",
        Error::NoData { .. } => "NoData",
    }
}

fn check_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let transport = Replay {
            response: sim.as_object().map(|_| HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                reason: sim["reason"].as_str().unwrap_or_default().to_string(),
                body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
            }),
            seen: RefCell::new(Vec::new()),
        };
        let client = PharmVarClient::with_transport(ClientConfig::default(), &transport);

        let result = run(&client, case);

        // Verify the request, or its absence.
        let seen = transport.seen.borrow();
        match case.get("expected_request") {
            Some(expected_req) if !expected_req.is_null() => {
                assert_eq!(seen.len(), 1, "{name}: exactly one request");
                let req = &seen[0];
                assert_eq!(req.method, HttpMethod::Get, "{name}: method");
                assert_eq!(
                    req.url,
                    format!("{BASE_URL}/{}", expected_req["path"].as_str().unwrap()),
                    "{name}: url"
                );
                assert_eq!(
                    req.header("Accept"),
                    expected_req["accept"].as_str(),
                    "{name}: accept header"
                );
                assert!(req.body.is_none(), "{name}: body should be None");
            }
            _ => assert!(seen.is_empty(), "{name}: no request expected"),
        }

        // Verify the outcome.
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(name);
            assert_eq!(error_name(&err), expected_error.as_str().unwrap(), "{name}: error kind");
            if let Some(fragment) = case.get("expected_message_contains") {
                let text = err.to_string();
                assert!(text.contains(fragment.as_str().unwrap()), "{name}: message {text:?}");
            }
        } else {
            let value = result.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
            assert_eq!(value, case["expected_result"], "{name}: parsed result");
        }
    }
}

#[test]
fn query_test_vectors() {
    check_vectors(include_str!("../../test-vectors/queries.json"));
}

#[test]
fn error_test_vectors() {
    check_vectors(include_str!("../../test-vectors/errors.json"));
}
