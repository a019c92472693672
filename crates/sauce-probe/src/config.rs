//! Suite configuration.
//!
//! Values resolve in layers: built-in defaults, then an optional YAML file,
//! then environment variables. The CLI applies its flags last through the
//! `with_*` builders.

use crate::fixtures::BASE_URL;
use crate::locator::DEFAULT_TIMEOUT_MS;
use crate::page_object::EXTERNAL_NAVIGATION_TIMEOUT_MS;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Storefront origin override
pub const ENV_BASE_URL: &str = "SAUCE_BASE_URL";
/// `true`/`false` headless override
pub const ENV_HEADLESS: &str = "SAUCE_HEADLESS";
/// Chromium executable
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";
/// Set to a truthy value to launch Chromium without its sandbox
pub const ENV_NO_SANDBOX: &str = "SAUCE_NO_SANDBOX";

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Storefront origin
    pub base_url: String,
    /// Run the browser without a window
    pub headless: bool,
    /// Window width
    pub viewport_width: u32,
    /// Window height
    pub viewport_height: u32,
    /// Chromium executable (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Keep the Chromium sandbox enabled (disable in containers)
    pub sandbox: bool,
    /// How long actions wait for an element to become actionable
    pub action_timeout_ms: u64,
    /// How long a storefront navigation may take
    pub navigation_timeout_ms: u64,
    /// How long the external "About" navigation may take
    pub external_navigation_timeout_ms: u64,
    /// Polling interval for waits
    pub poll_interval_ms: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
            action_timeout_ms: DEFAULT_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            external_navigation_timeout_ms: EXTERNAL_NAVIGATION_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl SuiteConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: &Path) -> ProbeResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Defaults, then `path` when given, then the process environment
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay environment values looked up through `lookup`
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> ProbeResult<Self> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            self.headless = parse_flag(ENV_HEADLESS, &raw)?;
        }
        if let Some(path) = lookup(ENV_CHROMIUM_PATH) {
            self.chromium_path = Some(path);
        }
        if let Some(raw) = lookup(ENV_NO_SANDBOX) {
            self.sandbox = !parse_flag(ENV_NO_SANDBOX, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values no run could use
    pub fn validate(&self) -> ProbeResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProbeError::config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ProbeError::config("viewport must be non-empty"));
        }
        for (name, value) in [
            ("action_timeout_ms", self.action_timeout_ms),
            ("navigation_timeout_ms", self.navigation_timeout_ms),
            ("external_navigation_timeout_ms", self.external_navigation_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ProbeError::config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the storefront origin
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the window size
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the Chromium executable
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the Chromium sandbox (containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the per-action timeout
    #[must_use]
    pub const fn with_action_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.action_timeout_ms = timeout_ms;
        self
    }

    /// Per-action timeout
    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Storefront navigation timeout
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// External navigation timeout
    #[must_use]
    pub const fn external_navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.external_navigation_timeout_ms)
    }

    /// Poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_flag(name: &str, raw: &str) -> ProbeResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ProbeError::config(format!("{name}: expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, "https://www.saucedemo.com");
            assert!(config.headless);
            assert!(config.sandbox);
            assert_eq!(config.action_timeout(), Duration::from_secs(5));
            assert_eq!(config.external_navigation_timeout(), Duration::from_secs(30));
            config.validate().unwrap();
        }

        #[test]
        fn test_builders() {
            let config = SuiteConfig::default()
                .with_base_url("http://localhost:3000/")
                .with_headless(false)
                .with_no_sandbox()
                .with_viewport(800, 600)
                .with_action_timeout_ms(250);
            assert_eq!(config.base_url, "http://localhost:3000");
            assert!(!config.headless);
            assert!(!config.sandbox);
            assert_eq!(config.viewport_width, 800);
            assert_eq!(config.action_timeout_ms, 250);
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml_str("headless: false\naction_timeout_ms: 1000\n").unwrap();
            assert!(!config.headless);
            assert_eq!(config.action_timeout_ms, 1000);
            assert_eq!(config.base_url, BASE_URL);
        }

        #[test]
        fn test_unknown_key_is_rejected() {
            assert!(matches!(
                SuiteConfig::from_yaml_str("base_ulr: https://example.com\n"),
                Err(ProbeError::Yaml(_))
            ));
        }

        #[test]
        fn test_invalid_values_are_rejected() {
            assert!(matches!(
                SuiteConfig::from_yaml_str("base_url: ftp://example.com\n"),
                Err(ProbeError::Config { .. })
            ));
            assert!(matches!(
                SuiteConfig::from_yaml_str("poll_interval_ms: 0\n"),
                Err(ProbeError::Config { .. })
            ));
        }

        #[test]
        fn test_yaml_round_trip_through_file() {
            let original = SuiteConfig::default().with_chromium_path("/usr/bin/chromium");
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(original.to_yaml().unwrap().as_bytes()).unwrap();
            let loaded = SuiteConfig::from_file(file.path()).unwrap();
            assert_eq!(loaded, original);
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let missing = dir.path().join("absent.yaml");
            assert!(matches!(SuiteConfig::from_file(&missing), Err(ProbeError::Io(_))));
        }
    }

    mod env_tests {
        use super::*;

        #[test]
        fn test_env_overrides() {
            let config = SuiteConfig::default()
                .apply_env_from(env(&[
                    (ENV_BASE_URL, "http://127.0.0.1:8080"),
                    (ENV_HEADLESS, "false"),
                    (ENV_CHROMIUM_PATH, "/opt/chrome"),
                    (ENV_NO_SANDBOX, "1"),
                ]))
                .unwrap();
            assert_eq!(config.base_url, "http://127.0.0.1:8080");
            assert!(!config.headless);
            assert_eq!(config.chromium_path.as_deref(), Some("/opt/chrome"));
            assert!(!config.sandbox);
        }

        #[test]
        fn test_empty_env_changes_nothing() {
            let config = SuiteConfig::default().apply_env_from(env(&[])).unwrap();
            assert_eq!(config, SuiteConfig::default());
        }

        #[test]
        fn test_bad_flag_is_config_error() {
            let err = SuiteConfig::default()
                .apply_env_from(env(&[(ENV_HEADLESS, "maybe")]))
                .unwrap_err();
            assert!(err.to_string().contains(ENV_HEADLESS));
        }
    }
}
