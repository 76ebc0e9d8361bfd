//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Absent optional strings are
//! null pointers. Conversion functions live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use event_core::{ApiError, Event, EventDraft, EventStatus, HttpMethod, Statistics};

/// Opaque handle to an `EventClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiEventClient {
    pub(crate) inner: event_core::EventClient,
}

/// Copy `s` into a heap C string. Interior NUL bytes are dropped.
pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|err| {
            let mut bytes = err.into_vec();
            bytes.retain(|&b| b != 0);
            CString::new(bytes).unwrap_or_default()
        })
        .into_raw()
}

fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), c_string)
}

/// Borrow a caller-owned C string. Null or non-UTF-8 input yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Reclaim a C string produced by `c_string`. Null is ignored.
///
/// # Safety
/// `ptr` must be null or come from `c_string` and not have been freed.
pub(crate) unsafe fn drop_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Hand a vector to C as a pointer/length pair. Empty vectors become null.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// Reclaim a pointer/length pair produced by `into_raw_parts`.
///
/// # Safety
/// `ptr` and `len` must come from `into_raw_parts` and not have been freed.
unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `event_build_*` functions. The C caller executes the request
/// and passes the response back through `event_parse_*`. `url` is absolute
/// and already carries the query string.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: event_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
            body: c_string_opt(req.body),
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            drop_c_string(req.url);
            drop_c_string(req.body);
            for header in from_raw_parts(req.headers, req.headers_len) {
                drop_c_string(header.key);
                drop_c_string(header.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to an `event_parse_*` function. The FFI layer reads
/// but does not free these fields. A null body is read as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    /// # Safety
    /// `body` must be null or a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> event_core::HttpResponse {
        let body = unsafe { str_arg(self.body) }.unwrap_or("");
        event_core::HttpResponse::json(self.status, body)
    }
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiEventStatus {
    Upcoming = 0,
    Ongoing = 1,
    Completed = 2,
    Cancelled = 3,
}

impl From<EventStatus> for FfiEventStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Upcoming => FfiEventStatus::Upcoming,
            EventStatus::Ongoing => FfiEventStatus::Ongoing,
            EventStatus::Completed => FfiEventStatus::Completed,
            EventStatus::Cancelled => FfiEventStatus::Cancelled,
        }
    }
}

impl From<FfiEventStatus> for EventStatus {
    fn from(status: FfiEventStatus) -> Self {
        match status {
            FfiEventStatus::Upcoming => EventStatus::Upcoming,
            FfiEventStatus::Ongoing => EventStatus::Ongoing,
            FfiEventStatus::Completed => EventStatus::Completed,
            FfiEventStatus::Cancelled => EventStatus::Cancelled,
        }
    }
}

/// A single event exposed to C.
///
/// `id`, `description`, `created_at` and `updated_at` are null when absent.
/// `capacity` is meaningful only when `has_capacity` is true.
#[repr(C)]
pub struct FfiEvent {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub date: *mut c_char,
    pub time: *mut c_char,
    pub location: *mut c_char,
    pub description: *mut c_char,
    pub has_capacity: bool,
    pub capacity: u32,
    pub status: FfiEventStatus,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
}

impl From<Event> for FfiEvent {
    fn from(event: Event) -> Self {
        FfiEvent {
            id: c_string_opt(event.id),
            title: c_string(event.title),
            date: c_string(event.date),
            time: c_string(event.time),
            location: c_string(event.location),
            description: c_string_opt(event.description),
            has_capacity: event.capacity.is_some(),
            capacity: event.capacity.unwrap_or(0),
            status: event.status.into(),
            created_at: c_string_opt(event.created_at),
            updated_at: c_string_opt(event.updated_at),
        }
    }
}

impl FfiEvent {
    /// Free the C-string fields (but not the struct itself).
    ///
    /// # Safety
    /// Every pointer field must come from `c_string` or be null.
    pub(crate) unsafe fn free_fields(&self) {
        for field in [
            self.id,
            self.title,
            self.date,
            self.time,
            self.location,
            self.description,
            self.created_at,
            self.updated_at,
        ] {
            unsafe { drop_c_string(field) };
        }
    }
}

/// A list of events exposed to C.
#[repr(C)]
pub struct FfiEventList {
    pub items: *mut FfiEvent,
    pub len: u32,
}

/// Form input from C. Null strings are read as empty.
///
/// `capacity` is free text: anything that is not a non-negative integer
/// means "no capacity".
#[repr(C)]
pub struct FfiEventDraft {
    pub title: *const c_char,
    pub date: *const c_char,
    pub time: *const c_char,
    pub location: *const c_char,
    pub description: *const c_char,
    pub capacity: *const c_char,
    pub status: FfiEventStatus,
}

impl FfiEventDraft {
    /// # Safety
    /// Every string field must be null or a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> EventDraft {
        let text = |ptr| unsafe { str_arg(ptr) }.unwrap_or("").to_string();
        EventDraft {
            title: text(self.title),
            date: text(self.date),
            time: text(self.time),
            location: text(self.location),
            description: text(self.description),
            capacity: text(self.capacity),
            status: self.status.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiEventResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// The server answered with an envelope whose status is not a success.
    /// `error_message` is the server's message, meant for the user.
    Application = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    MissingData = 5,
    Panic = 6,
    NullArg = 7,
    InvalidArg = 8,
}

/// Tag that tells `event_free_result` what `FfiEventResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Event = 1,
    EventList = 2,
    /// `data` is a `char*` holding the statistics object as JSON.
    Statistics = 3,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null. `http_status` carries the
/// envelope or HTTP status when one is known.
#[repr(C)]
pub struct FfiEventResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiEventResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiEventResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiEventResult {
            error_code,
            error_message: c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_event(event: Event) -> *mut Self {
        let event = Box::new(FfiEvent::from(event));
        Self::ok(FfiDataTag::Event, Box::into_raw(event) as *mut c_void)
    }

    /// Create and update may succeed without echoing the record.
    pub(crate) fn ok_optional_event(event: Option<Event>) -> *mut Self {
        match event {
            Some(event) => Self::ok_event(event),
            None => Self::ok_empty(),
        }
    }

    pub(crate) fn ok_event_list(events: Vec<Event>) -> *mut Self {
        let (items, len) = into_raw_parts(events.into_iter().map(FfiEvent::from).collect());
        let list = Box::new(FfiEventList { items, len });
        Self::ok(FfiDataTag::EventList, Box::into_raw(list) as *mut c_void)
    }

    pub(crate) fn ok_statistics(stats: Statistics) -> *mut Self {
        match serde_json::to_string(&stats) {
            Ok(json) => Self::ok(FfiDataTag::Statistics, c_string(json) as *mut c_void),
            Err(err) => Self::err(FfiErrorCode::Serialization, 0, err.to_string()),
        }
    }

    /// Build a success result with no data payload (e.g. delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::Application { status, .. } => (FfiErrorCode::Application, *status),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::MissingData => (FfiErrorCode::MissingData, 0),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::InvalidBaseUrl(_) => (FfiErrorCode::InvalidArg, 0),
        };
        Self::err(code, status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not have
    /// been freed.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        unsafe { drop_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Event => {
                let event = unsafe { Box::from_raw(result.data as *mut FfiEvent) };
                unsafe { event.free_fields() };
            }
            FfiDataTag::EventList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiEventList) };
                for item in unsafe { from_raw_parts(list.items, list.len) } {
                    unsafe { item.free_fields() };
                }
            }
            FfiDataTag::Statistics => unsafe { drop_c_string(result.data as *mut c_char) },
            FfiDataTag::None => {}
        }
    }
}
