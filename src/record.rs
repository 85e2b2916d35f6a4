use std::{collections::BTreeMap, fmt};

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{self, HeaderValue};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use bytes::Bytes;
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::config::Config;
use crate::level::Severity;

/// One log record describing an inbound request.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Log target, taken from `logger_name`.
    pub target: String,
    pub level: Severity,
    /// Summary such as `Request: GET /index.html`.
    pub message: String,
    pub(crate) fields: Vec<Field>,
}

impl RequestRecord {
    /// Value of the rendered field named `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find_map(|field| match field {
            Field::KV(k, v) if *k == key => Some(v),
            _ => None,
        })
    }

    /// Rendered fields in emission order.
    pub fn kvs(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().filter_map(|field| match field {
            Field::KV(k, v) => Some((*k, v)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Field {
    /// Key, Value
    /// Used during result saving
    KV(&'static str, Value),
    /// Method. Example: GET
    Method,
    /// Request path. Example: /index.html
    Path,
    /// Raw query string. Example: search=actix
    Query,
    /// Peer address. Example: 192.168.0.1:51234
    RemoteAddr,
    /// User agent. Example: Mozilla/5.0
    UserAgent,
    /// Referer. Example: https://actix.rs
    Referer,
    /// Host. Example: localhost:8080
    Host,
    /// Version of the HTTP protocol. Example: HTTP/1.1
    Proto,
    /// Content-Type header. Example: application/json
    ContentType,
    /// Declared body length, -1 when unknown. Example: 1024
    ContentLength,
    /// Moment the record was assembled.
    Timestamp,
}

/// Metadata fields every record carries, in order.
const REQUEST_FIELDS: [Field; 11] = [
    Field::Method,
    Field::Path,
    Field::Query,
    Field::RemoteAddr,
    Field::UserAgent,
    Field::Referer,
    Field::Host,
    Field::Proto,
    Field::ContentType,
    Field::ContentLength,
    Field::Timestamp,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Time(Timestamp),
    Bytes(RawBody),
    Headers(HeaderFields),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// RFC 3339 formatted when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub OffsetDateTime);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

/// Captured body bytes. Displays as text when the bytes are UTF-8 and
/// ASCII-escaped otherwise, so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody(pub Bytes);

impl fmt::Display for RawBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{}", self.0.escape_ascii()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderFields {
    /// Every header, each with all of its values.
    All(BTreeMap<String, Vec<String>>),
    /// Selected headers, first value only.
    Selected(BTreeMap<String, String>),
}

impl Field {
    fn render_request(&mut self, now: OffsetDateTime, req: &ServiceRequest) {
        match self {
            Field::Method => {
                *self = Field::KV("method", Value::Str(req.method().to_string()));
            }

            Field::Path => {
                *self = Field::KV("path", Value::Str(req.path().to_string()));
            }

            Field::Query => {
                *self = Field::KV("query", Value::Str(req.query_string().to_string()));
            }

            Field::RemoteAddr => {
                *self = Field::KV(
                    "remote_addr",
                    Value::Str(req.peer_addr().map(|a| a.to_string()).unwrap_or_default()),
                );
            }

            Field::UserAgent => {
                *self = Field::KV("user_agent", header_str(req, header::USER_AGENT));
            }

            Field::Referer => {
                *self = Field::KV("referer", header_str(req, header::REFERER));
            }

            Field::Host => {
                // the request's own Host, never the forwarding headers
                let host = match req.headers().get(header::HOST) {
                    Some(value) => lossy(value),
                    None => req
                        .uri()
                        .authority()
                        .map(|a| a.to_string())
                        .unwrap_or_default(),
                };
                *self = Field::KV("host", Value::Str(host));
            }

            Field::Proto => {
                let version = match req.version() {
                    actix_http::Version::HTTP_09 => "HTTP/0.9",
                    actix_http::Version::HTTP_10 => "HTTP/1.0",
                    actix_http::Version::HTTP_11 => "HTTP/1.1",
                    actix_http::Version::HTTP_2 => "HTTP/2.0",
                    actix_http::Version::HTTP_3 => "HTTP/3.0",
                    _ => "unknown",
                };
                *self = Field::KV("proto", Value::Str(version.to_string()));
            }

            Field::ContentType => {
                *self = Field::KV("content_type", header_str(req, header::CONTENT_TYPE));
            }

            Field::ContentLength => {
                *self = Field::KV("content_length", Value::Int(content_length(req)));
            }

            Field::Timestamp => {
                *self = Field::KV("timestamp", Value::Time(Timestamp(now)));
            }

            Field::KV(..) => {}
        }
    }
}

fn lossy(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

fn header_str(req: &ServiceRequest, name: header::HeaderName) -> Value {
    Value::Str(req.headers().get(name).map(lossy).unwrap_or_default())
}

/// Declared `Content-Length`, `-1` for a streamed body of unknown size.
fn content_length(req: &ServiceRequest) -> i64 {
    let headers = req.headers();
    match headers.get(header::CONTENT_LENGTH) {
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(-1),
        None if headers.contains_key(header::TRANSFER_ENCODING) => -1,
        None => 0,
    }
}

/// Header selection for a request, `None` when nothing qualifies.
///
/// `include_all_headers` wins over `include_headers` when both are set.
pub(crate) fn select_headers(config: &Config, req: &ServiceRequest) -> Option<HeaderFields> {
    if config.include_all_headers {
        let mut all: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in req.headers().iter() {
            let excluded = config
                .exclude_headers
                .iter()
                .any(|ex| ex.eq_ignore_ascii_case(name.as_str()));
            if !excluded {
                all.entry(name.to_string()).or_default().push(lossy(value));
            }
        }
        (!all.is_empty()).then_some(HeaderFields::All(all))
    } else if !config.include_headers.is_empty() {
        let mut selected = BTreeMap::new();
        for name in &config.include_headers {
            if let Some(value) = req.headers().get(name.as_str()).map(lossy) {
                if !value.is_empty() {
                    selected.insert(name.clone(), value);
                }
            }
        }
        (!selected.is_empty()).then_some(HeaderFields::Selected(selected))
    } else {
        None
    }
}

/// Build the record for `req`. `body` is the captured body, if capture ran.
pub(crate) fn assemble(config: &Config, req: &ServiceRequest, body: Option<Bytes>) -> RequestRecord {
    let now = OffsetDateTime::now_utc();

    let mut fields = REQUEST_FIELDS.to_vec();
    for unit in &mut fields {
        unit.render_request(now, req);
    }

    if let Some(headers) = select_headers(config, req) {
        fields.push(Field::KV("headers", Value::Headers(headers)));
    }

    if let Some(body) = body.filter(|b| config.include_request_body && !b.is_empty()) {
        if config.base64_encode_body {
            fields.push(Field::KV("request_body_b64", Value::Str(BASE64.encode(&body))));
        } else {
            fields.push(Field::KV("request_body", Value::Bytes(RawBody(body))));
        }
    }

    RequestRecord {
        target: config.logger_name.clone(),
        level: config.log_level,
        message: format!("Request: {} {}", req.method(), req.path()),
        fields,
    }
}
