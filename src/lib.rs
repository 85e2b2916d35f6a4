//! Actix-web middleware that inspects inbound requests and emits one
//! structured log record per request.
//!
//! The middleware decides whether a request is logged at all (skip rules),
//! optionally captures a bounded prefix of the request body without taking
//! it away from the handler, assembles a field set from request metadata,
//! headers and body, and hands it to a log sink before calling the next
//! service. Responses are not inspected.
//!
//! # Examples:
//! ## By default middleware uses the standard `log` crate for logging.
//! ```bash
//! cargo add actix-web-middleware-request-logger
//! ```
//! Example usage with standard `log` crate and `structured_logger` crate:
//! ```rust
//! use actix_web::{web, App, HttpServer};
//! use actix_web_middleware_request_logger::{Config, RequestLogger};
//! use structured_logger::{Builder, async_json::new_writer};
//!
//! #[actix_web::main] // or #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     Builder::new()
//!         .with_target_writer("*", new_writer(tokio::io::stdout()))
//!         .init();
//!
//!     // Built once, cloned into every worker.
//!     let logger = RequestLogger::new(
//!         Config::default()
//!             .include_request_body(true)
//!             .max_body_size(64 * 1024)
//!             .skip_path("/health"),
//!     );
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(logger.clone())
//!             .route("/", web::post().to(|body: String| async move { body }))
//!     })
//!     .bind("127.0.0.1:8080")?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Settings can be built in code with [`Config`]'s builder methods, deserialized
//! with serde (the keys match the directive names below), or loaded from
//! directive text:
//!
//! ```rust
//! use actix_web_middleware_request_logger::RequestLogger;
//!
//! let logger = RequestLogger::from_directives(
//!     r#"
//!     request_logger {
//!         logger_name api_requests
//!         log_level debug
//!         include_request_body
//!         base64_encode_body
//!         max_body_size 512KB
//!         skip_methods OPTIONS
//!         skip_paths /health /metrics
//!         include_headers X-Request-Id
//!         exclude_headers Authorization Cookie
//!         skip_content_types image/
//!     }
//!     "#,
//! )
//! .unwrap();
//! ```
//!
//! | Directive | Arguments | Meaning |
//! |---|---|---|
//! | `logger_name` | name | log target, default `request_logger` |
//! | `log_level` | `debug`, `info`, `warn`, `error` | anything else means `info` |
//! | `include_request_body` | - | capture the body |
//! | `include_all_headers` | - | log every header |
//! | `base64_encode_body` | - | log the body as base64 |
//! | `max_body_size` | size such as `1.5MB` | capture limit, default 1MB |
//! | `skip_methods` | methods... | case-insensitive exact match |
//! | `skip_paths` | substrings... | path contains any |
//! | `include_headers` | names... | logged when not logging all headers |
//! | `exclude_headers` | names... | left out when logging all headers |
//! | `skip_content_types` | substrings... | content type contains any, case-insensitive |
//!
//! # Available Fields
//!
//! - `method` - HTTP method (GET, POST, etc.)
//! - `path` - Request path
//! - `query` - Raw query string
//! - `remote_addr` - Peer address
//! - `user_agent` - Client user agent
//! - `referer` - Request referrer
//! - `host` - Request host
//! - `proto` - HTTP protocol version
//! - `content_type` - Request content type
//! - `content_length` - Declared body length, `-1` when unknown
//! - `timestamp` - RFC3339 time the record was assembled
//! - `headers` - Selected headers, when configured
//! - `request_body` / `request_body_b64` - Captured body, when enabled
//!
//! # Body capture
//!
//! At most `max_body_size` bytes are read. The handler receives a fresh
//! payload holding exactly the captured bytes, so a body longer than the
//! limit reaches the handler truncated. A payload error yields an empty
//! capture and never fails the request.
//!
//! # Feature Flags
//!
//! - `log` (default) - Emit records through the standard `log` crate

mod capture;
mod config;
mod directive;
mod error;
mod filter;
mod level;
mod logger;
mod record;
mod size;
mod wrapper;

pub use crate::config::{Config, DEFAULT_LOGGER_NAME, DEFAULT_MAX_BODY_SIZE};
pub use crate::error::{ConfigError, SizeError};
pub use crate::level::Severity;
pub use crate::logger::{RequestLogger, RequestLoggerMiddlewareService};
pub use crate::record::{HeaderFields, RawBody, RequestRecord, Timestamp, Value};
pub use crate::size::parse_size;
pub use crate::wrapper::{Discard, RecordSink};
#[cfg(feature = "log")]
pub use crate::wrapper::rust_log;
