//! Verify request building, response parsing, path extraction and keyword
//! parsing against JSON test vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON (not raw strings) so field ordering
//! cannot cause false negatives.

use std::collections::BTreeMap;

use judge_core::{
    build_request, extract_path, parse_keywords_from_text, CallResult, Executor, HttpMethod, HttpRequest,
    HttpResponse, HttpTransport, RequestSpec,
};
use judge_core::error::ApiError;
use serde_json::Value;

/// Transport that answers every request with one simulated response.
struct Simulated(HttpResponse);

impl HttpTransport for Simulated {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.0.clone())
    }
}

fn spec_from_vector(input: &Value) -> RequestSpec {
    let method: HttpMethod = serde_json::from_value(input["method"].clone()).unwrap();
    let headers: Option<BTreeMap<String, String>> = input
        .get("headers")
        .map(|h| serde_json::from_value(h.clone()).unwrap());
    let body_template = input
        .get("body_template")
        .map(|t| t.as_object().unwrap().clone());
    RequestSpec::new(
        method,
        input["url"].as_str().unwrap(),
        input["keyword_param"].as_str().unwrap(),
        input["keyword"].as_str().unwrap(),
    )
    .with_headers(headers)
    .with_body_template(body_template)
}

// ---------------------------------------------------------------------------
// Request executor
// ---------------------------------------------------------------------------

#[test]
fn build_request_test_vectors() {
    let raw = include_str!("../../test-vectors/build_request.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let spec = spec_from_vector(&case["input"]);
        let expected_req = &case["expected_request"];

        // Verify build
        let req = build_request(&spec).unwrap();
        let expected_method: HttpMethod = serde_json::from_value(expected_req["method"].clone()).unwrap();
        assert_eq!(req.method, expected_method, "{name}: method");
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match req.body.as_deref() {
            Some(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected_req["body"], "{name}: body");
            }
            None => assert!(expected_req["body"].is_null(), "{name}: body should be None"),
        }

        // Verify parse and normalization
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            reason: sim["reason"].as_str().unwrap().to_string(),
            body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
        };
        let result = Executor::with_transport(Simulated(response)).execute(&spec);
        let expected: CallResult = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result, expected, "{name}: call result");
    }
}

// ---------------------------------------------------------------------------
// Path extractor
// ---------------------------------------------------------------------------

#[test]
fn extract_path_test_vectors() {
    let raw = include_str!("../../test-vectors/extract_path.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let path = case["path"].as_str().unwrap();
        let extracted = extract_path(&case["value"], path);

        match case["expected"].as_object() {
            Some(expected) => assert_eq!(extracted, Some(&expected["value"]), "{name}"),
            None => assert_eq!(extracted, None, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[test]
fn keyword_test_vectors() {
    let raw = include_str!("../../test-vectors/keywords.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let keywords = parse_keywords_from_text(
            case["text"].as_str().unwrap(),
            case["delimiter"].as_str().unwrap(),
        );
        let expected: Vec<String> = serde_json::from_value(case["expected"].clone()).unwrap();
        assert_eq!(keywords, expected, "{name}");
    }
}
