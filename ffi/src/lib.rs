//! C-ABI wrapper around `event-core`.
//!
//! # Overview
//! Exposes the event API through `extern "C"` functions so any language
//! with a C FFI can build requests, parse responses and validate form input
//! without linking to an async runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `event_build_*` / `event_parse_*` mirrors the core API 1:1.
//! - A single `FfiEventResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `event_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use event_core::{EventClient, HttpRequest, HttpResponse, RequiredField};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client for `{base_url}/api.php`.
///
/// Returns null if `base_url` is null or not a valid URL.
/// The caller must free the returned pointer with `event_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn event_client_new(base_url: *const c_char) -> *mut FfiEventClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { str_arg(base_url) }) else {
            return std::ptr::null_mut();
        };
        match EventClient::new(url) {
            Ok(inner) => Box::into_raw(Box::new(FfiEventClient { inner })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client for `{base_url}/{endpoint}`.
#[unsafe(no_mangle)]
pub extern "C" fn event_client_new_with_endpoint(
    base_url: *const c_char,
    endpoint: *const c_char,
) -> *mut FfiEventClient {
    catch_unwind(|| {
        let (Some(url), Some(endpoint)) = (unsafe { str_arg(base_url) }, unsafe {
            str_arg(endpoint)
        }) else {
            return std::ptr::null_mut();
        };
        match EventClient::with_endpoint(url, endpoint) {
            Ok(inner) => Box::into_raw(Box::new(FfiEventClient { inner })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `event_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn event_client_free(client: *mut FfiEventClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Run `f` against the client, returning null if the client is null, `f`
/// declines, or anything panics.
fn build(
    client: *const FfiEventClient,
    f: impl FnOnce(&EventClient) -> Option<HttpRequest>,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match f(&client.inner) {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Build `GET api.php` (all events).
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `event_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_list_events(client: *const FfiEventClient) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_list_events()))
}

/// Build `GET api.php?id=…`. Returns null if `client` or `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_get_event(
    client: *const FfiEventClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let id = unsafe { str_arg(id) }?;
        Some(c.build_get_event(id))
    })
}

/// Build `GET api.php?date=…`.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_list_events_by_date(
    client: *const FfiEventClient,
    date: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let date = unsafe { str_arg(date) }?;
        Some(c.build_list_events_by_date(date))
    })
}

/// Build `GET api.php?date_from=…&date_to=…`.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_list_events_by_date_range(
    client: *const FfiEventClient,
    from: *const c_char,
    to: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let from = unsafe { str_arg(from) }?;
        let to = unsafe { str_arg(to) }?;
        Some(c.build_list_events_by_date_range(from, to))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn event_build_list_events_by_status(
    client: *const FfiEventClient,
    status: FfiEventStatus,
) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_list_events_by_status(status.into())))
}

/// Build `GET api.php?stats=<flag>`. Pass 1 unless the server says otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_get_statistics(
    client: *const FfiEventClient,
    flag: i32,
) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_get_statistics(flag)))
}

/// Build `POST api.php` from form input.
///
/// Returns null if `client` or `draft` is null, or if a required field is
/// blank (see `event_draft_missing_fields`).
#[unsafe(no_mangle)]
pub extern "C" fn event_build_create_event(
    client: *const FfiEventClient,
    draft: *const FfiEventDraft,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        if draft.is_null() {
            return None;
        }
        let event = unsafe { (*draft).to_core() }.to_event().ok()?;
        c.build_create_event(&event).ok()
    })
}

/// Build `PUT api.php?id=…` replacing the whole record with `draft`.
///
/// Returns null under the same conditions as `event_build_create_event`, or
/// if `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_update_event(
    client: *const FfiEventClient,
    id: *const c_char,
    draft: *const FfiEventDraft,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let id = unsafe { str_arg(id) }?;
        if draft.is_null() {
            return None;
        }
        let event = unsafe { (*draft).to_core() }.to_event().ok()?;
        c.build_update_event(id, &event).ok()
    })
}

/// Build `DELETE api.php?id=…`.
#[unsafe(no_mangle)]
pub extern "C" fn event_build_delete_event(
    client: *const FfiEventClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let id = unsafe { str_arg(id) }?;
        Some(c.build_delete_event(id))
    })
}

// ---------------------------------------------------------------------------
// Draft validation
// ---------------------------------------------------------------------------

pub const EVENT_FIELD_TITLE: u32 = 1;
pub const EVENT_FIELD_DATE: u32 = 1 << 1;
pub const EVENT_FIELD_TIME: u32 = 1 << 2;
pub const EVENT_FIELD_LOCATION: u32 = 1 << 3;

/// Bitmask of required fields that are blank in `draft` (`EVENT_FIELD_*`).
/// Zero means the draft can be submitted. A null draft reports every field.
#[unsafe(no_mangle)]
pub extern "C" fn event_draft_missing_fields(draft: *const FfiEventDraft) -> u32 {
    let all = RequiredField::ALL
        .into_iter()
        .fold(0, |mask, field| mask | field.bit());
    catch_unwind(|| {
        if draft.is_null() {
            return all;
        }
        unsafe { (*draft).to_core() }.missing_mask()
    })
    .unwrap_or(all)
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

fn parse(
    name: &str,
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
    f: impl FnOnce(&EventClient, HttpResponse) -> *mut FfiEventResult,
) -> *mut FfiEventResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiEventResult::null_arg("client");
        }
        if response.is_null() {
            return FfiEventResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let response = unsafe { (*response).to_core() };
        f(&client.inner, response)
    }))
    .unwrap_or_else(|_| FfiEventResult::panic(&format!("panic in {name}")))
}

/// Parse a list-all response. `data_tag = EventList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn event_parse_list_events(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_list_events", client, response, |c, r| {
        match c.parse_list_events(r) {
            Ok(events) => FfiEventResult::ok_event_list(events),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

/// Parse a get-by-id response. `data_tag = Event` on success.
#[unsafe(no_mangle)]
pub extern "C" fn event_parse_get_event(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_get_event", client, response, |c, r| {
        match c.parse_get_event(r) {
            Ok(event) => FfiEventResult::ok_event(event),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn event_parse_list_events_by_date(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_list_events_by_date", client, response, |c, r| {
        match c.parse_list_events_by_date(r) {
            Ok(events) => FfiEventResult::ok_event_list(events),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn event_parse_list_events_by_date_range(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse(
        "event_parse_list_events_by_date_range",
        client,
        response,
        |c, r| match c.parse_list_events_by_date_range(r) {
            Ok(events) => FfiEventResult::ok_event_list(events),
            Err(e) => FfiEventResult::from_error(e),
        },
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn event_parse_list_events_by_status(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_list_events_by_status", client, response, |c, r| {
        match c.parse_list_events_by_status(r) {
            Ok(events) => FfiEventResult::ok_event_list(events),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

/// Parse a statistics response. `data_tag = Statistics` on success; `data`
/// is the statistics object serialized as a JSON C string.
#[unsafe(no_mangle)]
pub extern "C" fn event_parse_get_statistics(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_get_statistics", client, response, |c, r| {
        match c.parse_get_statistics(r) {
            Ok(stats) => FfiEventResult::ok_statistics(stats),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

/// Parse a create response (envelope status 201). `data_tag` is `Event`
/// when the server echoed the record and `None` otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn event_parse_create_event(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_create_event", client, response, |c, r| {
        match c.parse_create_event(r) {
            Ok(event) => FfiEventResult::ok_optional_event(event),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn event_parse_update_event(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_update_event", client, response, |c, r| {
        match c.parse_update_event(r) {
            Ok(event) => FfiEventResult::ok_optional_event(event),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

/// Parse a delete response. `data_tag = None` on success.
#[unsafe(no_mangle)]
pub extern "C" fn event_parse_delete_event(
    client: *const FfiEventClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEventResult {
    parse("event_parse_delete_event", client, response, |c, r| {
        match c.parse_delete_event(r) {
            Ok(()) => FfiEventResult::ok_empty(),
            Err(e) => FfiEventResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `event_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn event_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free an `FfiEventResult` returned by any `event_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn event_free_result(result: *mut FfiEventResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiEventResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn event_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| unsafe { drop_c_string(s) });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    const BASE: &str = "http://localhost:3000";

    fn client() -> *mut FfiEventClient {
        let url = CString::new(BASE).unwrap();
        let client = event_client_new(url.as_ptr());
        assert!(!client.is_null());
        client
    }

    fn read(ptr: *const c_char) -> &'static str {
        assert!(!ptr.is_null());
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn response(status: u16, body: &CString) -> FfiHttpResponse {
        FfiHttpResponse {
            status,
            body: body.as_ptr(),
        }
    }

    struct DraftText {
        title: CString,
        date: CString,
        time: CString,
        location: CString,
        capacity: CString,
    }

    impl DraftText {
        fn new(title: &str) -> Self {
            Self {
                title: CString::new(title).unwrap(),
                date: CString::new("2025-12-15").unwrap(),
                time: CString::new("19:00").unwrap(),
                location: CString::new("Hall B").unwrap(),
                capacity: CString::new("50").unwrap(),
            }
        }

        fn draft(&self) -> FfiEventDraft {
            FfiEventDraft {
                title: self.title.as_ptr(),
                date: self.date.as_ptr(),
                time: self.time.as_ptr(),
                location: self.location.as_ptr(),
                description: std::ptr::null(),
                capacity: self.capacity.as_ptr(),
                status: FfiEventStatus::Ongoing,
            }
        }
    }

    #[test]
    fn client_new_and_free() {
        event_client_free(client());
    }

    #[test]
    fn client_new_rejects_null_and_bad_urls() {
        assert!(event_client_new(std::ptr::null()).is_null());
        let bad = CString::new("not a url").unwrap();
        assert!(event_client_new(bad.as_ptr()).is_null());
        event_client_free(std::ptr::null_mut());
    }

    #[test]
    fn client_with_custom_endpoint() {
        let url = CString::new(BASE).unwrap();
        let endpoint = CString::new("events.php").unwrap();
        let client = event_client_new_with_endpoint(url.as_ptr(), endpoint.as_ptr());
        let req = event_build_list_events(client);
        assert_eq!(read(unsafe { (*req).url }), "http://localhost:3000/events.php");
        event_free_request(req);
        event_client_free(client);
    }

    #[test]
    fn build_list_events_returns_plain_get() {
        let client = client();
        let req = event_build_list_events(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Get);
        assert_eq!(read(req_ref.url), "http://localhost:3000/api.php");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        event_free_request(req);
        event_client_free(client);
    }

    #[test]
    fn build_null_client_returns_null() {
        assert!(event_build_list_events(std::ptr::null()).is_null());
        assert!(event_build_get_statistics(std::ptr::null(), 1).is_null());
    }

    #[test]
    fn build_query_requests() {
        let client = client();
        let id = CString::new("42").unwrap();
        let from = CString::new("2025-01-01").unwrap();
        let to = CString::new("2025-01-31").unwrap();

        let cases = [
            (event_build_get_event(client, id.as_ptr()), "?id=42"),
            (
                event_build_list_events_by_date(client, from.as_ptr()),
                "?date=2025-01-01",
            ),
            (
                event_build_list_events_by_date_range(client, from.as_ptr(), to.as_ptr()),
                "?date_from=2025-01-01&date_to=2025-01-31",
            ),
            (
                event_build_list_events_by_status(client, FfiEventStatus::Cancelled),
                "?status=cancelled",
            ),
            (event_build_get_statistics(client, 1), "?stats=1"),
        ];
        for (req, query) in cases {
            assert!(!req.is_null(), "{query}");
            let req_ref = unsafe { &*req };
            assert_eq!(req_ref.method, FfiHttpMethod::Get);
            assert_eq!(
                read(req_ref.url),
                format!("http://localhost:3000/api.php{query}")
            );
            event_free_request(req);
        }
        event_client_free(client);
    }

    #[test]
    fn build_get_event_null_id_returns_null() {
        let client = client();
        assert!(event_build_get_event(client, std::ptr::null()).is_null());
        assert!(event_build_delete_event(client, std::ptr::null()).is_null());
        event_client_free(client);
    }

    #[test]
    fn build_create_event_produces_post_with_json_body() {
        let client = client();
        let text = DraftText::new("Rust meetup");
        let draft = text.draft();
        let req = event_build_create_event(client, &draft);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Post);
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(read(header.key), "content-type");
        assert_eq!(read(header.value), "application/json");

        let body: serde_json::Value = serde_json::from_str(read(req_ref.body)).unwrap();
        assert_eq!(body["title"], "Rust meetup");
        assert_eq!(body["capacity"], 50);
        assert_eq!(body["status"], "ongoing");
        assert!(body.get("id").is_none());
        assert!(body.get("description").is_none());

        event_free_request(req);
        event_client_free(client);
    }

    #[test]
    fn build_create_event_rejects_invalid_draft() {
        let client = client();
        let text = DraftText::new("   ");
        let draft = text.draft();
        assert!(event_build_create_event(client, &draft).is_null());
        assert!(event_build_create_event(client, std::ptr::null()).is_null());
        event_client_free(client);
    }

    #[test]
    fn build_update_event_puts_by_id() {
        let client = client();
        let id = CString::new("5").unwrap();
        let text = DraftText::new("Renamed");
        let draft = text.draft();
        let req = event_build_update_event(client, id.as_ptr(), &draft);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Put);
        assert_eq!(read(req_ref.url), "http://localhost:3000/api.php?id=5");
        let body: serde_json::Value = serde_json::from_str(read(req_ref.body)).unwrap();
        assert_eq!(body["title"], "Renamed");
        assert!(body.get("id").is_none());

        event_free_request(req);
        event_client_free(client);
    }

    #[test]
    fn build_delete_event_by_id() {
        let client = client();
        let id = CString::new("7").unwrap();
        let req = event_build_delete_event(client, id.as_ptr());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Delete);
        assert_eq!(read(req_ref.url), "http://localhost:3000/api.php?id=7");
        event_free_request(req);
        event_client_free(client);
    }

    #[test]
    fn missing_fields_mask() {
        let text = DraftText::new("");
        let mut draft = text.draft();
        draft.location = std::ptr::null();
        assert_eq!(
            event_draft_missing_fields(&draft),
            EVENT_FIELD_TITLE | EVENT_FIELD_LOCATION
        );

        let text = DraftText::new("ok");
        assert_eq!(event_draft_missing_fields(&text.draft()), 0);
        assert_eq!(event_draft_missing_fields(std::ptr::null()), 0b1111);
    }

    #[test]
    fn parse_list_events_two_items() {
        let client = client();
        let body = CString::new(
            r#"{"status":200,"message":"ok","data":[
                {"id":1,"title":"First","date":"2025-01-01","time":"10:00","location":"A","capacity":"30","status":"upcoming"},
                {"id":"2","title":"Second","date":"2025-01-02","time":"11:00","location":"B","description":"Talk","capacity":null,"status":"completed"}
            ]}"#,
        )
        .unwrap();
        let result = event_parse_list_events(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::EventList);

        let list = unsafe { &*(r.data as *const FfiEventList) };
        assert_eq!(list.len, 2);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };

        assert_eq!(read(items[0].id), "1");
        assert_eq!(read(items[0].title), "First");
        assert!(items[0].description.is_null());
        assert!(items[0].has_capacity);
        assert_eq!(items[0].capacity, 30);

        assert_eq!(read(items[1].id), "2");
        assert_eq!(read(items[1].description), "Talk");
        assert!(!items[1].has_capacity);
        assert_eq!(items[1].status, FfiEventStatus::Completed);

        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_list_events_without_data_is_empty() {
        let client = client();
        let body = CString::new(r#"{"status":200,"message":"ok","data":null}"#).unwrap();
        let result = event_parse_list_events_by_status(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let list = unsafe { &*(r.data as *const FfiEventList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_application_error_carries_server_message() {
        let client = client();
        let body =
            CString::new(r#"{"status":404,"message":"Event not found","data":null}"#).unwrap();
        let result = event_parse_get_event(client, &response(404, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Application);
        assert_eq!(r.http_status, 404);
        assert_eq!(read(r.error_message), "Event not found");
        assert!(r.data.is_null());
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_non_envelope_error_is_http() {
        let client = client();
        let body = CString::new("Bad Gateway").unwrap();
        let result = event_parse_delete_event(client, &response(502, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 502);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_create_event_with_and_without_echo() {
        let client = client();
        let echoed = CString::new(
            r#"{"status":201,"message":"Event created successfully","data":
                {"id":9,"title":"New","date":"2025-01-01","time":"10:00","location":"A","status":"upcoming",
                 "created_at":"2025-01-01 09:00:00"}}"#,
        )
        .unwrap();
        let result = event_parse_create_event(client, &response(201, &echoed));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Event);
        let event = unsafe { &*(r.data as *const FfiEvent) };
        assert_eq!(read(event.id), "9");
        assert_eq!(read(event.created_at), "2025-01-01 09:00:00");
        assert!(event.updated_at.is_null());
        event_free_result(result);

        let bare = CString::new(r#"{"status":201,"message":"created","data":null}"#).unwrap();
        let result = event_parse_create_event(client, &response(201, &bare));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::None);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_create_event_rejects_200() {
        let client = client();
        let body = CString::new(r#"{"status":200,"message":"odd","data":null}"#).unwrap();
        let result = event_parse_create_event(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Application);
        assert_eq!(read(r.error_message), "odd");
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_update_event_success() {
        let client = client();
        let body = CString::new(
            r#"{"status":200,"message":"updated","data":
                {"id":"5","title":"Updated","date":"2025-01-01","time":"10:00","location":"A","capacity":"","status":"cancelled"}}"#,
        )
        .unwrap();
        let result = event_parse_update_event(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let event = unsafe { &*(r.data as *const FfiEvent) };
        assert_eq!(read(event.title), "Updated");
        assert!(!event.has_capacity);
        assert_eq!(event.status, FfiEventStatus::Cancelled);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_statistics_as_json() {
        let client = client();
        let body = CString::new(
            r#"{"status":200,"message":"ok","data":{"total":3,"upcoming":2}}"#,
        )
        .unwrap();
        let result = event_parse_get_statistics(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Statistics);
        let json: serde_json::Value = serde_json::from_str(read(r.data as *const c_char)).unwrap();
        assert_eq!(json["total"], 3);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_statistics_missing_data() {
        let client = client();
        let body = CString::new(r#"{"status":200,"message":"ok"}"#).unwrap();
        let result = event_parse_get_statistics(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::MissingData);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_garbage_success_body_is_deserialization_error() {
        let client = client();
        let body = CString::new("not json").unwrap();
        let result = event_parse_list_events_by_date(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Deserialization);
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn parse_null_arguments() {
        let body = CString::new("{}").unwrap();
        let result = event_parse_list_events(std::ptr::null(), &response(200, &body));
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        event_free_result(result);

        let client = client();
        let result = event_parse_list_events_by_date_range(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(read(r.error_message), "null argument: response");
        event_free_result(result);
        event_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        event_free_request(std::ptr::null_mut());
        event_free_result(std::ptr::null_mut());
        event_free_string(std::ptr::null_mut());
    }
}
