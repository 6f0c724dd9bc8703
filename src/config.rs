//! Test environment configuration.
//!
//! Everything is resolved once from environment variables into an immutable
//! [`Config`] value which is then passed explicitly to the session, page
//! objects and harness. There is no global configuration state.

use std::path::PathBuf;

/// Target environment for a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Public OrangeHRM demo instance
    #[default]
    Demo,
    /// Staging deployment
    Staging,
    /// Local development deployment
    Dev,
}

impl Environment {
    /// Parse an environment name; unknown names fall back to [`Environment::Demo`]
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "staging" => Self::Staging,
            "dev" => Self::Dev,
            _ => Self::Demo,
        }
    }

    /// Environment name as used in `HRM_ENV`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Staging => "staging",
            Self::Dev => "dev",
        }
    }

    /// Base URL of the application under test for this environment
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Demo => "https://opensource-demo.orangehrmlive.com",
            Self::Staging => "https://staging-demo.orangehrmlive.com",
            Self::Dev => "http://localhost:8080",
        }
    }

    /// Built-in credentials for this environment (overridable via env vars)
    #[must_use]
    pub fn default_credentials(&self) -> Credentials {
        match self {
            Self::Demo | Self::Staging => Credentials::new("Admin", "admin123"),
            Self::Dev => Credentials::new("admin", "admin"),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A username/password pair for the application under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Immutable configuration for a test run
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved target environment
    pub environment: Environment,
    /// Base URL of the application under test
    pub base_url: String,
    /// Admin credentials for the target environment
    pub credentials: Credentials,
    /// Run the browser headless
    pub headless: bool,
    /// Artificial delay between browser actions, in milliseconds
    pub slow_mo_ms: u64,
    /// Default timeout for browser operations (ms)
    pub default_timeout_ms: u64,
    /// Timeout for page navigations (ms)
    pub navigation_timeout_ms: u64,
    /// Timeout for single element actions (ms)
    pub action_timeout_ms: u64,
    /// Capture a screenshot when a test fails
    pub screenshot_on_failure: bool,
    /// Record video when a test fails
    pub video_on_failure: bool,
    /// Record a session trace when a test fails
    pub trace_on_failure: bool,
    /// Retry count read for the external runner; not enforced here
    pub max_retries: u32,
    /// Delay between external-runner retries, in seconds
    pub retry_delay_s: u64,
    /// Report output directory
    pub reports_dir: PathBuf,
    /// Failure screenshot directory
    pub screenshots_dir: PathBuf,
    /// Video output directory
    pub videos_dir: PathBuf,
    /// Trace output directory
    pub traces_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(|_| None)
    }
}

impl Config {
    /// Resolve configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup
    ///
    /// Separated from [`Config::from_env`] so the resolution logic can be
    /// tested without mutating process state.
    #[must_use]
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("HRM_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let defaults = environment.default_credentials();
        let credentials = Credentials::new(
            lookup("HRM_USERNAME").unwrap_or(defaults.username),
            lookup("HRM_PASSWORD").unwrap_or(defaults.password),
        );

        let reports_dir =
            PathBuf::from(lookup("REPORTS_DIR").unwrap_or_else(|| "reports".to_string()));
        let sub_dir = |key: &str, leaf: &str| {
            lookup(key).map_or_else(|| reports_dir.join(leaf), PathBuf::from)
        };

        Self {
            environment,
            base_url: lookup("HRM_BASE_URL").unwrap_or_else(|| environment.base_url().to_string()),
            credentials,
            headless: bool_var(&lookup, "HEADLESS", true),
            slow_mo_ms: u64_var(&lookup, "SLOW_MO", 0),
            default_timeout_ms: u64_var(&lookup, "DEFAULT_TIMEOUT", 30_000),
            navigation_timeout_ms: u64_var(&lookup, "NAVIGATION_TIMEOUT", 30_000),
            action_timeout_ms: u64_var(&lookup, "ACTION_TIMEOUT", 10_000),
            screenshot_on_failure: bool_var(&lookup, "SCREENSHOT_ON_FAILURE", true),
            video_on_failure: bool_var(&lookup, "VIDEO_ON_FAILURE", false),
            trace_on_failure: bool_var(&lookup, "TRACE_ON_FAILURE", true),
            max_retries: u32_var(&lookup, "MAX_RETRIES", 1),
            retry_delay_s: u64_var(&lookup, "RETRY_DELAY", 2),
            screenshots_dir: sub_dir("SCREENSHOTS_DIR", "screenshots"),
            videos_dir: sub_dir("VIDEOS_DIR", "videos"),
            traces_dir: sub_dir("TRACES_DIR", "traces"),
            reports_dir,
        }
    }

    /// Username for the resolved environment
    #[must_use]
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Password for the resolved environment
    #[must_use]
    pub fn password(&self) -> &str {
        &self.credentials.password
    }
}

fn bool_var<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: bool) -> bool {
    lookup(key).map_or(default, |v| v.eq_ignore_ascii_case("true"))
}

fn u64_var<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: u64) -> u64 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn u32_var<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: u32) -> u32 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    mod environment_tests {
        use super::*;

        #[test]
        fn test_parse_known_names() {
            assert_eq!(Environment::parse("demo"), Environment::Demo);
            assert_eq!(Environment::parse("Staging"), Environment::Staging);
            assert_eq!(Environment::parse("DEV"), Environment::Dev);
        }

        #[test]
        fn test_parse_unknown_falls_back_to_demo() {
            assert_eq!(Environment::parse("production"), Environment::Demo);
            assert_eq!(Environment::parse(""), Environment::Demo);
        }

        #[test]
        fn test_base_urls() {
            assert!(Environment::Demo.base_url().contains("opensource-demo"));
            assert!(Environment::Dev.base_url().contains("localhost"));
        }

        #[test]
        fn test_display() {
            assert_eq!(Environment::Staging.to_string(), "staging");
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_defaults_when_nothing_set() {
            let config = Config::resolve(|_| None);
            assert_eq!(config.environment, Environment::Demo);
            assert_eq!(config.username(), "Admin");
            assert_eq!(config.password(), "admin123");
            assert!(config.headless);
            assert_eq!(config.slow_mo_ms, 0);
            assert_eq!(config.default_timeout_ms, 30_000);
            assert_eq!(config.action_timeout_ms, 10_000);
            assert!(config.screenshot_on_failure);
            assert!(!config.video_on_failure);
            assert_eq!(config.max_retries, 1);
            assert_eq!(config.screenshots_dir, PathBuf::from("reports/screenshots"));
        }

        #[test]
        fn test_environment_selects_base_url_and_credentials() {
            let vars = HashMap::from([("HRM_ENV", "dev")]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.environment, Environment::Dev);
            assert_eq!(config.base_url, "http://localhost:8080");
            assert_eq!(config.username(), "admin");
        }

        #[test]
        fn test_credential_overrides() {
            let vars = HashMap::from([
                ("HRM_USERNAME", "qa_admin"),
                ("HRM_PASSWORD", "s3cret"),
            ]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.username(), "qa_admin");
            assert_eq!(config.password(), "s3cret");
        }

        #[test]
        fn test_base_url_override() {
            let vars = HashMap::from([("HRM_BASE_URL", "http://10.0.0.5:8080")]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.base_url, "http://10.0.0.5:8080");
        }

        #[test]
        fn test_flag_and_timeout_parsing() {
            let vars = HashMap::from([
                ("HEADLESS", "false"),
                ("SLOW_MO", "250"),
                ("DEFAULT_TIMEOUT", "5000"),
                ("MAX_RETRIES", "3"),
            ]);
            let config = Config::resolve(lookup_from(&vars));
            assert!(!config.headless);
            assert_eq!(config.slow_mo_ms, 250);
            assert_eq!(config.default_timeout_ms, 5000);
            assert_eq!(config.max_retries, 3);
        }

        #[test]
        fn test_unparseable_numbers_fall_back() {
            let vars = HashMap::from([("SLOW_MO", "fast")]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.slow_mo_ms, 0);
        }

        #[test]
        fn test_artifact_dirs_follow_reports_dir() {
            let vars = HashMap::from([("REPORTS_DIR", "out")]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.screenshots_dir, PathBuf::from("out/screenshots"));
            assert_eq!(config.traces_dir, PathBuf::from("out/traces"));
        }

        #[test]
        fn test_explicit_artifact_dir_wins() {
            let vars = HashMap::from([
                ("REPORTS_DIR", "out"),
                ("SCREENSHOTS_DIR", "/tmp/shots"),
            ]);
            let config = Config::resolve(lookup_from(&vars));
            assert_eq!(config.screenshots_dir, PathBuf::from("/tmp/shots"));
        }
    }
}
