use serde::Deserialize;

use crate::level::Severity;

pub const DEFAULT_LOGGER_NAME: &str = "request_logger";
pub const DEFAULT_MAX_BODY_SIZE: u64 = 1024 * 1024;

/// Settings for [`RequestLogger`](crate::RequestLogger).
///
/// The value is resolved once with [`Config::provision`] and never changes
/// while requests are served.
///
/// # Examples
/// ```rust
/// use actix_web_middleware_request_logger::{Config, Severity};
///
/// let config = Config::default()
///     .log_level(Severity::Debug)
///     .include_request_body(true)
///     .max_body_size(64 * 1024)
///     .skip_path("/health")
///     .skip_method("OPTIONS");
///
/// assert_eq!(config.logger_name, "request_logger");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log target records are emitted under.
    pub logger_name: String,
    pub log_level: Severity,
    pub include_request_body: bool,
    pub include_all_headers: bool,
    /// Upper bound in bytes for captured request bodies.
    #[serde(deserialize_with = "crate::size::deserialize")]
    pub max_body_size: u64,
    /// Methods never logged, compared case-insensitively.
    pub skip_methods: Vec<String>,
    /// Paths containing any of these substrings are never logged.
    pub skip_paths: Vec<String>,
    /// Headers logged when `include_all_headers` is off.
    pub include_headers: Vec<String>,
    /// Headers left out when `include_all_headers` is on.
    pub exclude_headers: Vec<String>,
    /// Content types containing any of these substrings (case-insensitive) are never logged.
    pub skip_content_types: Vec<String>,
    pub base64_encode_body: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            log_level: Severity::Info,
            include_request_body: false,
            include_all_headers: false,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            skip_methods: Vec::new(),
            skip_paths: Vec::new(),
            include_headers: Vec::new(),
            exclude_headers: Vec::new(),
            skip_content_types: Vec::new(),
            base64_encode_body: false,
        }
    }
}

impl Config {
    /// Fill in defaults for settings that were left blank.
    ///
    /// An empty logger name and a zero body limit both count as unset.
    pub fn provision(mut self) -> Self {
        if self.logger_name.is_empty() {
            self.logger_name = DEFAULT_LOGGER_NAME.to_string();
        }
        if self.max_body_size == 0 {
            self.max_body_size = DEFAULT_MAX_BODY_SIZE;
        }
        self
    }

    /// Body limit as an in-memory length.
    pub(crate) fn body_limit(&self) -> usize {
        usize::try_from(self.max_body_size).unwrap_or(usize::MAX)
    }

    pub fn logger_name<T: Into<String>>(mut self, name: T) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn log_level(mut self, level: Severity) -> Self {
        self.log_level = level;
        self
    }

    pub fn include_request_body(mut self, enabled: bool) -> Self {
        self.include_request_body = enabled;
        self
    }

    pub fn include_all_headers(mut self, enabled: bool) -> Self {
        self.include_all_headers = enabled;
        self
    }

    pub fn base64_encode_body(mut self, enabled: bool) -> Self {
        self.base64_encode_body = enabled;
        self
    }

    pub fn max_body_size(mut self, bytes: u64) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Do not log requests with this method.
    pub fn skip_method<T: Into<String>>(mut self, method: T) -> Self {
        self.skip_methods.push(method.into());
        self
    }

    /// Do not log requests whose path contains `path`.
    pub fn skip_path<T: Into<String>>(mut self, path: T) -> Self {
        self.skip_paths.push(path.into());
        self
    }

    /// Do not log requests whose content type contains `content_type`.
    pub fn skip_content_type<T: Into<String>>(mut self, content_type: T) -> Self {
        self.skip_content_types.push(content_type.into());
        self
    }

    pub fn include_header<T: Into<String>>(mut self, name: T) -> Self {
        self.include_headers.push(name.into());
        self
    }

    pub fn exclude_header<T: Into<String>>(mut self, name: T) -> Self {
        self.exclude_headers.push(name.into());
        self
    }
}
