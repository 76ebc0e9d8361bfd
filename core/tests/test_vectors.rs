//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use event_core::{ApiError, Event, EventClient, EventStatus, HttpMethod, HttpRequest, HttpResponse};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> EventClient {
    EventClient::new(BASE_URL).unwrap()
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (
                    arr[0].as_str().unwrap().to_string(),
                    arr[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::json(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Application" => {
            assert!(err.is_application(), "{name}: expected Application, got {err:?}");
            assert_eq!(
                err.application_message(),
                expected["message"].as_str(),
                "{name}: message"
            );
        }
        "Http" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected Http"),
        other => panic!("{name}: unknown expected_error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = match case["operation"].as_str().unwrap() {
            "list" => c.build_list_events(),
            "by_date" => c.build_list_events_by_date(input["date"].as_str().unwrap()),
            "by_date_range" => c.build_list_events_by_date_range(
                input["from"].as_str().unwrap(),
                input["to"].as_str().unwrap(),
            ),
            "by_status" => {
                let status: EventStatus = input["status"].as_str().unwrap().parse().unwrap();
                c.build_list_events_by_status(status)
            }
            other => panic!("{name}: unknown operation {other}"),
        };
        check_request(name, &req, &case["expected_request"]);

        let response = simulated(&case);
        let result = match case["operation"].as_str().unwrap() {
            "list" => c.parse_list_events(response),
            "by_date" => c.parse_list_events_by_date(response),
            "by_date_range" => c.parse_list_events_by_date_range(response),
            _ => c.parse_list_events_by_status(response),
        };

        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Vec<Event> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_event(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_event(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Event = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Event = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_event(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_event(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Event = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), Some(expected), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: Event = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_event(id, &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_event(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Event = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), Some(expected), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_delete_event(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_event(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
