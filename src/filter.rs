use crate::config::Config;

impl Config {
    /// Whether a request with these properties is left out of the log.
    ///
    /// Rules run in order (method, path, content type) and the first match wins.
    /// Path and content type rules are plain substring checks, so a skip path
    /// of `/api` also matches `/api-docs`.
    pub fn should_skip(&self, method: &str, path: &str, content_type: &str) -> bool {
        self.skips_method(method) || self.skips_path(path) || self.skips_content_type(content_type)
    }

    fn skips_method(&self, method: &str) -> bool {
        self.skip_methods
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(method))
    }

    fn skips_path(&self, path: &str) -> bool {
        self.skip_paths.iter().any(|skip| path.contains(skip.as_str()))
    }

    fn skips_content_type(&self, content_type: &str) -> bool {
        if self.skip_content_types.is_empty() {
            return false;
        }
        let content_type = content_type.to_lowercase();
        self.skip_content_types
            .iter()
            .any(|skip| content_type.contains(&skip.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rules_skip_nothing() {
        let config = Config::default();
        assert!(!config.should_skip("GET", "/", ""));
        assert!(!config.should_skip("OPTIONS", "/health", "image/png"));
    }

    #[test]
    fn test_method_rule_ignores_case() {
        let config = Config::default().skip_method("OPTIONS");
        assert!(config.should_skip("OPTIONS", "/", ""));
        assert!(config.should_skip("options", "/", ""));
        assert!(!config.should_skip("GET", "/", ""));
        // exact, not substring
        assert!(!config.should_skip("OPTION", "/", ""));
    }

    #[test]
    fn test_path_rule_is_substring() {
        let config = Config::default().skip_path("/health");
        assert!(config.should_skip("GET", "/health", ""));
        assert!(config.should_skip("GET", "/health/check", ""));
        assert!(config.should_skip("GET", "/v1/health", ""));
        assert!(!config.should_skip("GET", "/healt", ""));

        let config = Config::default().skip_path("/api");
        assert!(config.should_skip("GET", "/api-docs", ""));

        // case-sensitive
        let config = Config::default().skip_path("/Health");
        assert!(!config.should_skip("GET", "/health", ""));
    }

    #[test]
    fn test_content_type_rule_ignores_case() {
        let config = Config::default().skip_content_type("image/");
        assert!(config.should_skip("POST", "/upload", "image/png"));
        assert!(config.should_skip("POST", "/upload", "IMAGE/JPEG"));
        assert!(!config.should_skip("POST", "/upload", "application/json"));
        assert!(!config.should_skip("POST", "/upload", ""));

        let config = Config::default().skip_content_type("Multipart/");
        assert!(config.should_skip("POST", "/", "multipart/form-data; boundary=x"));
    }

    #[test]
    fn test_decision_is_repeatable() {
        let config = Config::default()
            .skip_method("HEAD")
            .skip_path("/static")
            .skip_content_type("text/css");

        for _ in 0..3 {
            assert!(config.should_skip("HEAD", "/", ""));
            assert!(config.should_skip("GET", "/static/app.js", ""));
            assert!(config.should_skip("GET", "/", "text/css"));
            assert!(!config.should_skip("GET", "/index.html", "text/html"));
        }
    }
}
