use std::sync::Arc;

use crate::record::RequestRecord;

/// Destination for assembled request records.
///
/// Implemented for any `Fn(&RequestRecord) + Send + Sync`, so a closure can
/// route records somewhere other than the `log` facade.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &RequestRecord);
}

impl<F> RecordSink for F
where
    F: Fn(&RequestRecord) + Send + Sync,
{
    fn emit(&self, record: &RequestRecord) {
        self(record)
    }
}

/// Drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl RecordSink for Discard {
    fn emit(&self, _record: &RequestRecord) {}
}

#[cfg(feature = "log")]
pub(crate) fn default_sink() -> Arc<dyn RecordSink> {
    Arc::new(rust_log::RustLog)
}

#[cfg(not(feature = "log"))]
pub(crate) fn default_sink() -> Arc<dyn RecordSink> {
    Arc::new(Discard)
}

#[cfg(feature = "log")]
pub mod rust_log {
    use crate::record::{RequestRecord, Value};
    use crate::wrapper::RecordSink;
    use std::panic::Location;

    /// Sends records to the global `log` logger, with fields as key-values.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RustLog;

    impl RecordSink for RustLog {
        fn emit(&self, record: &RequestRecord) {
            log(record, module_path!(), Location::caller());
        }
    }

    fn to_value(value: &Value) -> log::kv::Value<'_> {
        match value {
            Value::Str(s) => log::kv::Value::from(s.as_str()),
            Value::Int(n) => log::kv::Value::from(*n),
            Value::Time(ts) => log::kv::Value::from_display(ts),
            Value::Bytes(body) => log::kv::Value::from_display(body),
            Value::Headers(headers) => log::kv::Value::from_serde(headers),
        }
    }

    pub fn log(record: &RequestRecord, module_path: &'static str, loc: &'static Location) {
        let level = log::Level::from(record.level);
        if level > log::max_level() {
            return;
        }

        let kvs: Vec<(&str, log::kv::Value)> =
            record.kvs().map(|(k, v)| (k, to_value(v))).collect();
        let kvs = kvs.as_slice();

        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", record.message))
                .level(level)
                .target(&record.target)
                .module_path_static(Some(module_path))
                .file_static(Some(loc.file()))
                .line(Some(loc.line()))
                .key_values(&kvs)
                .build(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink: Arc<dyn RecordSink> = {
            let seen = Arc::clone(&seen);
            Arc::new(move |record: &RequestRecord| {
                seen.lock().unwrap().push(record.message.clone());
            })
        };

        sink.emit(&RequestRecord {
            target: "request_logger".to_string(),
            level: Severity::Info,
            message: "Request: GET /".to_string(),
            fields: Vec::new(),
        });
        Discard.emit(&RequestRecord {
            target: "request_logger".to_string(),
            level: Severity::Info,
            message: "dropped".to_string(),
            fields: Vec::new(),
        });

        assert_eq!(*seen.lock().unwrap(), vec!["Request: GET /".to_string()]);
    }

    #[cfg(feature = "log")]
    mod facade {
        use super::*;
        use crate::record::{Field, Value};
        use log::kv::{Key, Source};

        type Captured = (log::Level, String, Option<String>, Option<String>);

        struct Capture(Mutex<Vec<Captured>>);

        impl log::Log for Capture {
            fn enabled(&self, _: &log::Metadata) -> bool {
                true
            }

            fn log(&self, record: &log::Record) {
                if record.target() != "facade_test" {
                    return;
                }
                let kvs = record.key_values();
                self.0.lock().unwrap().push((
                    record.level(),
                    record.args().to_string(),
                    kvs.get(Key::from("method")).map(|v| v.to_string()),
                    kvs.get(Key::from("content_length")).map(|v| v.to_string()),
                ));
            }

            fn flush(&self) {}
        }

        static LOGGER: Capture = Capture(Mutex::new(Vec::new()));

        #[test]
        fn test_rust_log_sink() {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);

            rust_log::RustLog.emit(&RequestRecord {
                target: "facade_test".to_string(),
                level: Severity::Warn,
                message: "Request: PUT /items".to_string(),
                fields: vec![
                    Field::KV("method", Value::Str("PUT".to_string())),
                    Field::KV("content_length", Value::Int(42)),
                ],
            });

            let captured = LOGGER.0.lock().unwrap();
            assert_eq!(
                *captured,
                vec![(
                    log::Level::Warn,
                    "Request: PUT /items".to_string(),
                    Some("PUT".to_string()),
                    Some("42".to_string()),
                )]
            );
        }
    }
}
