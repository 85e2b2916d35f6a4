use thiserror::Error;

/// Failure to turn a human readable size such as `512KB` into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("empty size string")]
    EmptySizeString,

    #[error("no numeric value found in size string: {0}")]
    NoNumericValue(String),

    #[error("invalid numeric value: {0}")]
    InvalidNumericValue(String),

    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// Configuration errors. Any of these stops the middleware from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("line {line}: unknown directive: {name}")]
    UnknownDirective { line: usize, name: String },

    #[error("line {line}: directive '{name}' expects {expected}, got {got} argument(s)")]
    ArgumentCount {
        line: usize,
        name: String,
        expected: &'static str,
        got: usize,
    },

    #[error("line {line}: invalid size: {source}")]
    InvalidSize {
        line: usize,
        #[source]
        source: SizeError,
    },

    #[error("line {line}: unterminated quoted argument")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unbalanced block braces")]
    UnbalancedBlock { line: usize },
}
