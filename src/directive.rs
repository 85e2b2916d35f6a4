//! Directive text loader for [`Config`].
//!
//! ```text
//! request_logger {
//!     logger_name api_requests
//!     log_level debug
//!     include_request_body
//!     max_body_size 512KB
//!     skip_paths /health /metrics
//!     exclude_headers Authorization Cookie
//! }
//! ```
//!
//! One directive per line. The enclosing `request_logger { ... }` block is
//! optional. List directives may repeat and their arguments accumulate.

use crate::config::Config;
use crate::error::ConfigError;
use crate::level::Severity;
use crate::size::parse_size;

const BLOCK_NAME: &str = "request_logger";

enum Handler {
    Text(fn(&mut Config) -> &mut String),
    Level,
    Size,
    Flag(fn(&mut Config) -> &mut bool),
    List(fn(&mut Config) -> &mut Vec<String>),
}

struct Directive {
    name: &'static str,
    handler: Handler,
}

const DIRECTIVES: &[Directive] = &[
    Directive {
        name: "logger_name",
        handler: Handler::Text(|c| &mut c.logger_name),
    },
    Directive {
        name: "log_level",
        handler: Handler::Level,
    },
    Directive {
        name: "include_request_body",
        handler: Handler::Flag(|c| &mut c.include_request_body),
    },
    Directive {
        name: "include_all_headers",
        handler: Handler::Flag(|c| &mut c.include_all_headers),
    },
    Directive {
        name: "base64_encode_body",
        handler: Handler::Flag(|c| &mut c.base64_encode_body),
    },
    Directive {
        name: "max_body_size",
        handler: Handler::Size,
    },
    Directive {
        name: "skip_methods",
        handler: Handler::List(|c| &mut c.skip_methods),
    },
    Directive {
        name: "skip_paths",
        handler: Handler::List(|c| &mut c.skip_paths),
    },
    Directive {
        name: "include_headers",
        handler: Handler::List(|c| &mut c.include_headers),
    },
    Directive {
        name: "exclude_headers",
        handler: Handler::List(|c| &mut c.exclude_headers),
    },
    Directive {
        name: "skip_content_types",
        handler: Handler::List(|c| &mut c.skip_content_types),
    },
];

impl Config {
    /// Build a provisioned config from directive text.
    ///
    /// # Examples
    /// ```rust
    /// use actix_web_middleware_request_logger::Config;
    ///
    /// let config = Config::from_directives(
    ///     "include_request_body\nmax_body_size 1.5MB\nskip_paths /health",
    /// )
    /// .unwrap();
    /// assert_eq!(config.max_body_size, 1_572_864);
    /// ```
    pub fn from_directives(input: &str) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        let mut depth = 0usize;
        let mut last_line = 0;

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            last_line = line;
            let tokens = tokenize(raw, line)?;

            match tokens.as_slice() {
                [] => {}
                [name, open] if name == BLOCK_NAME && open == "{" && depth == 0 => depth += 1,
                [close] if close == "}" => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(ConfigError::UnbalancedBlock { line })?;
                }
                [name, args @ ..] => config.apply(line, name, args)?,
            }
        }

        if depth != 0 {
            return Err(ConfigError::UnbalancedBlock { line: last_line });
        }

        Ok(config.provision())
    }

    fn apply(&mut self, line: usize, name: &str, args: &[String]) -> Result<(), ConfigError> {
        let directive = DIRECTIVES
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ConfigError::UnknownDirective {
                line,
                name: name.to_string(),
            })?;

        let arity = |expected: &'static str, ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::ArgumentCount {
                    line,
                    name: name.to_string(),
                    expected,
                    got: args.len(),
                })
            }
        };

        match &directive.handler {
            Handler::Text(field) => {
                arity("exactly one argument", args.len() == 1)?;
                *field(self) = args[0].clone();
            }
            Handler::Level => {
                arity("exactly one argument", args.len() == 1)?;
                self.log_level = Severity::from_name(&args[0]);
            }
            Handler::Size => {
                arity("exactly one argument", args.len() == 1)?;
                self.max_body_size = parse_size(&args[0])
                    .map_err(|source| ConfigError::InvalidSize { line, source })?;
            }
            Handler::Flag(field) => {
                arity("no arguments", args.is_empty())?;
                *field(self) = true;
            }
            Handler::List(field) => field(self).extend(args.iter().cloned()),
        }

        Ok(())
    }
}

/// Split a line into arguments. Double quotes group words, `#` outside quotes
/// ends the line.
fn tokenize(raw: &str, line: usize) -> Result<Vec<String>, ConfigError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '#' if !quoted && !in_token => break,
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ConfigError::UnterminatedQuote { line });
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
