use std::fmt;

use serde::{Deserialize, Deserializer};

/// Severity a request record is emitted at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Resolve a configured level name.
    ///
    /// Names are matched exactly (`debug`, `info`, `warn`, `error`).
    /// Anything else falls back to [`Severity::Info`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "debug" => Severity::Debug,
            "info" => Severity::Info,
            "warn" => Severity::Warn,
            "error" => Severity::Error,
            _ => {
                #[cfg(feature = "log")]
                log::warn!("unrecognized log level {name:?}, using \"info\"");
                Severity::Info
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        Severity::from_name(name)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Severity::from_name(&name))
    }
}

#[cfg(feature = "log")]
impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(Severity::from_name("debug"), Severity::Debug);
        assert_eq!(Severity::from_name("info"), Severity::Info);
        assert_eq!(Severity::from_name("warn"), Severity::Warn);
        assert_eq!(Severity::from_name("error"), Severity::Error);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(Severity::from_name("trace"), Severity::Info);
        assert_eq!(Severity::from_name("DEBUG"), Severity::Info);
        assert_eq!(Severity::from_name(""), Severity::Info);
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_deserialize_falls_back() {
        let level: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, Severity::Warn);
        let level: Severity = serde_json::from_str("\"verbose\"").unwrap();
        assert_eq!(level, Severity::Info);
    }

    #[cfg(feature = "log")]
    #[test]
    fn test_into_log_level() {
        assert_eq!(log::Level::from(Severity::Warn), log::Level::Warn);
        assert_eq!(log::Level::from(Severity::Debug), log::Level::Debug);
    }
}
