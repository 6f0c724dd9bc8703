//! Condition-polling wait utilities.
//!
//! Every wait is a bounded busy-poll: evaluate a predicate, sleep a poll
//! interval, repeat until the predicate holds or the budget is spent. The
//! generic entry point is [`wait_for_condition`]; [`Waits`] binds the same
//! loop to a page handle and adds the UI-specific conditions the suite
//! needs (element visibility, toast appearance, URL changes, network idle,
//! table loads).
//!
//! Waits are deliberately polling rather than event-driven, and one waiter
//! watches one condition. The suite runs sequentially, so there is never
//! more than one pending wait at a time.

use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::session::Page;
use std::time::{Duration, Instant};
use tracing::debug;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for UI-state waits (10 seconds)
pub const DEFAULT_UI_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for network-idle waits (30 seconds)
pub const NETWORK_IDLE_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for URL-pattern waits (15 seconds)
pub const URL_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Network idle threshold (500ms without resource-count change)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for a single wait operation
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_UI_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options sized for URL / navigation waits
    #[must_use]
    pub const fn navigation() -> Self {
        Self {
            timeout_ms: URL_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Options sized for network-idle waits
    #[must_use]
    pub const fn network_idle() -> Self {
        Self {
            timeout_ms: NETWORK_IDLE_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Outcome of a satisfied wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting before the condition held
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// GENERIC CONDITION WAIT
// =============================================================================

/// Poll `predicate` until it returns true or the budget is spent.
///
/// The predicate is evaluated before the first sleep, so an
/// already-satisfied condition returns immediately even with a zero
/// timeout. On timeout the caller's `message` is carried in the error.
pub fn wait_for_condition<F>(
    mut predicate: F,
    options: &WaitOptions,
    message: &str,
) -> E2eResult<WaitResult>
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    loop {
        if predicate() {
            let elapsed = start.elapsed();
            debug!(?elapsed, condition = message, "wait satisfied");
            return Ok(WaitResult {
                elapsed,
                waited_for: message.to_string(),
            });
        }
        if start.elapsed() >= options.timeout() {
            return Err(E2eError::Timeout {
                ms: options.timeout_ms,
                message: message.to_string(),
            });
        }
        std::thread::sleep(options.poll_interval());
    }
}

// =============================================================================
// URL PATTERNS
// =============================================================================

/// Pattern for matching page URLs
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Exact string match
    Exact(String),
    /// URL starts with prefix
    Prefix(String),
    /// URL contains substring
    Contains(String),
    /// Regular expression match
    Regex(regex::Regex),
    /// Matches any URL
    Any,
}

impl UrlPattern {
    /// Build a regex pattern, failing on an invalid expression
    pub fn regex(pattern: &str) -> E2eResult<Self> {
        let compiled = regex::Regex::new(pattern).map_err(|e| E2eError::Fixture {
            message: format!("invalid URL pattern {pattern:?}: {e}"),
        })?;
        Ok(Self::Regex(compiled))
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(expected) => url == expected,
            Self::Prefix(prefix) => url.starts_with(prefix.as_str()),
            Self::Contains(substring) => url.contains(substring.as_str()),
            Self::Regex(re) => re.is_match(url),
            Self::Any => true,
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "url == {s:?}"),
            Self::Prefix(s) => write!(f, "url starts with {s:?}"),
            Self::Contains(s) => write!(f, "url contains {s:?}"),
            Self::Regex(re) => write!(f, "url matches /{}/", re.as_str()),
            Self::Any => write!(f, "any url"),
        }
    }
}

// =============================================================================
// TOASTS
// =============================================================================

/// Toast notification variants shown by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Green success toast
    Success,
    /// Red error toast
    Error,
    /// Blue info toast
    Info,
}

impl ToastKind {
    /// CSS class of the toast container
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => ".oxd-toast--success",
            Self::Error => ".oxd-toast--error",
            Self::Info => ".oxd-toast--info",
        }
    }
}

// =============================================================================
// PAGE-BOUND WAITS
// =============================================================================

/// Wait specializations bound to a page handle
#[derive(Debug)]
pub struct Waits<'a> {
    page: &'a Page,
}

impl<'a> Waits<'a> {
    /// Bind waits to a page
    #[must_use]
    pub const fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// Wait until the element is present and visible
    pub fn element_visible(
        &self,
        locator: &Locator,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || matches!(self.page.is_visible(locator), Ok(true)),
            options,
            &format!("element visible: {locator}"),
        )
    }

    /// Wait until the element is hidden or absent
    pub fn element_hidden(
        &self,
        locator: &Locator,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || !matches!(self.page.is_visible(locator), Ok(true)),
            options,
            &format!("element hidden: {locator}"),
        )
    }

    /// Wait until the element's text contains the expected substring
    pub fn element_contains_text(
        &self,
        locator: &Locator,
        expected: &str,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || {
                self.page
                    .text_content(locator)
                    .is_ok_and(|text| text.contains(expected))
            },
            options,
            &format!("element {locator} contains text {expected:?}"),
        )
    }

    /// Wait until the locator matches exactly `expected` elements
    pub fn element_count(
        &self,
        locator: &Locator,
        expected: usize,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || self.page.count(locator).is_ok_and(|n| n == expected),
            options,
            &format!("element count of {locator} == {expected}"),
        )
    }

    /// Wait until the element's attribute equals the expected value
    pub fn attribute_equals(
        &self,
        locator: &Locator,
        attribute: &str,
        expected: &str,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || {
                self.page
                    .attribute(locator, attribute)
                    .is_ok_and(|value| value.as_deref() == Some(expected))
            },
            options,
            &format!("attribute {attribute:?} of {locator} == {expected:?}"),
        )
    }

    /// Wait until the element is enabled
    pub fn element_enabled(
        &self,
        locator: &Locator,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || matches!(self.page.is_enabled(locator), Ok(true)),
            options,
            &format!("element enabled: {locator}"),
        )
    }

    /// Wait until the element is disabled
    pub fn element_disabled(
        &self,
        locator: &Locator,
        options: &WaitOptions,
    ) -> E2eResult<WaitResult> {
        wait_for_condition(
            || matches!(self.page.is_enabled(locator), Ok(false)),
            options,
            &format!("element disabled: {locator}"),
        )
    }

    /// Wait until the page URL matches the pattern
    pub fn url_matches(&self, pattern: &UrlPattern, options: &WaitOptions) -> E2eResult<WaitResult> {
        wait_for_condition(
            || self.page.current_url().is_ok_and(|url| pattern.matches(&url)),
            options,
            &format!("{pattern}"),
        )
    }

    /// Wait until no resources have loaded for the idle threshold.
    ///
    /// Samples the page's resource count each poll; the network is
    /// considered idle once the count has been stable for
    /// [`NETWORK_IDLE_THRESHOLD_MS`].
    pub fn network_idle(&self, options: &WaitOptions) -> E2eResult<WaitResult> {
        let threshold = Duration::from_millis(NETWORK_IDLE_THRESHOLD_MS);
        let mut last_count = self.page.resource_count().unwrap_or(0);
        let mut stable_since = Instant::now();

        wait_for_condition(
            || {
                let count = self.page.resource_count().unwrap_or(last_count);
                if count != last_count {
                    last_count = count;
                    stable_since = Instant::now();
                }
                stable_since.elapsed() >= threshold
            },
            options,
            "network idle",
        )
    }

    /// Wait for a toast of the given kind; returns its locator
    pub fn toast(&self, kind: ToastKind, options: &WaitOptions) -> E2eResult<Locator> {
        let locator = Locator::css(kind.css_class());
        self.element_visible(&locator, options)?;
        Ok(locator)
    }

    /// Wait for the record table to be visible and the network to settle
    pub fn table_loaded(&self, options: &WaitOptions) -> E2eResult<WaitResult> {
        let table = Locator::css(".oxd-table-body");
        self.element_visible(&table, options)?;
        self.network_idle(&WaitOptions::network_idle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_UI_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_navigation_preset() {
            let opts = WaitOptions::navigation();
            assert_eq!(opts.timeout_ms, URL_TIMEOUT_MS);
        }

        #[test]
        fn test_network_idle_preset() {
            let opts = WaitOptions::network_idle();
            assert_eq!(opts.timeout_ms, NETWORK_IDLE_TIMEOUT_MS);
        }

        #[test]
        fn test_builders_chain() {
            let opts = WaitOptions::new().with_timeout(5000).with_poll_interval(25);
            assert_eq!(opts.timeout(), Duration::from_millis(5000));
            assert_eq!(opts.poll_interval(), Duration::from_millis(25));
        }
    }

    mod condition_tests {
        use super::*;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        #[test]
        fn test_immediate_success_even_with_zero_timeout() {
            let opts = WaitOptions::new().with_timeout(0);
            let result = wait_for_condition(|| true, &opts, "instant");
            assert!(result.is_ok());
        }

        #[test]
        fn test_timeout_carries_message_and_budget() {
            let opts = WaitOptions::new().with_timeout(100).with_poll_interval(10);
            let result = wait_for_condition(|| false, &opts, "never happens");
            match result {
                Err(E2eError::Timeout { ms, message }) => {
                    assert_eq!(ms, 100);
                    assert_eq!(message, "never happens");
                }
                other => panic!("expected timeout, got {other:?}"),
            }
        }

        #[test]
        fn test_returns_soon_after_condition_becomes_true() {
            let flag = Arc::new(AtomicBool::new(false));
            let writer = flag.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                writer.store(true, Ordering::SeqCst);
            });

            let opts = WaitOptions::new().with_timeout(2000).with_poll_interval(10);
            let start = Instant::now();
            let result = wait_for_condition(|| flag.load(Ordering::SeqCst), &opts, "flag");
            assert!(result.is_ok());
            // at most condition-true time plus one poll interval, with slack
            // for scheduler jitter
            assert!(start.elapsed() < Duration::from_millis(500));
        }

        #[test]
        fn test_timeout_elapses_at_least_the_budget() {
            let opts = WaitOptions::new().with_timeout(80).with_poll_interval(10);
            let start = Instant::now();
            let _ = wait_for_condition(|| false, &opts, "never");
            assert!(start.elapsed() >= Duration::from_millis(80));
        }

        #[test]
        fn test_fnmut_predicate_with_state() {
            let mut calls = 0;
            let opts = WaitOptions::new().with_timeout(1000).with_poll_interval(5);
            let result = wait_for_condition(
                || {
                    calls += 1;
                    calls >= 3
                },
                &opts,
                "third call",
            );
            assert!(result.is_ok());
            assert_eq!(calls, 3);
        }
    }

    mod url_pattern_tests {
        use super::*;

        const URL: &str = "https://opensource-demo.orangehrmlive.com/web/index.php/dashboard/index";

        #[test]
        fn test_exact() {
            assert!(UrlPattern::Exact(URL.into()).matches(URL));
            assert!(!UrlPattern::Exact(URL.into()).matches("https://other.com"));
        }

        #[test]
        fn test_prefix() {
            assert!(UrlPattern::Prefix("https://opensource-demo".into()).matches(URL));
            assert!(!UrlPattern::Prefix("http://".into()).matches(URL));
        }

        #[test]
        fn test_contains() {
            assert!(UrlPattern::Contains("/dashboard".into()).matches(URL));
            assert!(!UrlPattern::Contains("/auth/login".into()).matches(URL));
        }

        #[test]
        fn test_regex() {
            let pattern = UrlPattern::regex(r"/dashboard/\w+$").unwrap();
            assert!(pattern.matches(URL));
            assert!(!pattern.matches("https://example.com/auth/login"));
        }

        #[test]
        fn test_invalid_regex_is_rejected() {
            assert!(UrlPattern::regex("[unclosed").is_err());
        }

        #[test]
        fn test_any() {
            assert!(UrlPattern::Any.matches(""));
            assert!(UrlPattern::Any.matches(URL));
        }
    }

    mod toast_tests {
        use super::*;

        #[test]
        fn test_css_classes() {
            assert_eq!(ToastKind::Success.css_class(), ".oxd-toast--success");
            assert_eq!(ToastKind::Error.css_class(), ".oxd-toast--error");
            assert_eq!(ToastKind::Info.css_class(), ".oxd-toast--info");
        }
    }

    #[cfg(not(feature = "browser"))]
    mod page_wait_tests {
        use super::*;
        use crate::session::ElementState;

        fn fast() -> WaitOptions {
            WaitOptions::new().with_timeout(300).with_poll_interval(10)
        }

        #[test]
        fn test_element_visible_succeeds_when_present() {
            let page = Page::new_mock();
            let locator = Locator::css(".oxd-text--h5");
            page.upsert_element(&locator, ElementState::visible());

            let waits = Waits::new(&page);
            assert!(waits.element_visible(&locator, &fast()).is_ok());
        }

        #[test]
        fn test_element_visible_times_out_when_absent() {
            let page = Page::new_mock();
            let waits = Waits::new(&page);
            let result = waits.element_visible(&Locator::css(".missing"), &fast());
            assert!(matches!(result, Err(E2eError::Timeout { .. })));
        }

        #[test]
        fn test_element_visible_catches_late_arrival() {
            let page = Page::new_mock();
            let locator = Locator::css(".oxd-toast--success");

            let scripted = page.clone();
            let scripted_locator = locator.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                scripted.upsert_element(&scripted_locator, ElementState::visible());
            });

            let waits = Waits::new(&page);
            let opts = WaitOptions::new().with_timeout(2000).with_poll_interval(10);
            assert!(waits.element_visible(&locator, &opts).is_ok());
        }

        #[test]
        fn test_element_hidden_after_removal() {
            let page = Page::new_mock();
            let locator = Locator::css(".oxd-loading-spinner");
            page.upsert_element(&locator, ElementState::visible());

            let scripted = page.clone();
            let scripted_locator = locator.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                scripted.remove_element(&scripted_locator);
            });

            let waits = Waits::new(&page);
            let opts = WaitOptions::new().with_timeout(2000).with_poll_interval(10);
            assert!(waits.element_hidden(&locator, &opts).is_ok());
        }

        #[test]
        fn test_element_contains_text() {
            let page = Page::new_mock();
            let locator = Locator::css(".oxd-toast--success");
            page.upsert_element(
                &locator,
                ElementState::visible().with_text("Successfully Saved"),
            );

            let waits = Waits::new(&page);
            assert!(waits
                .element_contains_text(&locator, "Saved", &fast())
                .is_ok());
            assert!(waits
                .element_contains_text(&locator, "Deleted", &fast())
                .is_err());
        }

        #[test]
        fn test_url_wait_login_to_dashboard() {
            let page = Page::new_mock();
            page.set_url("https://demo.example.com/web/index.php/auth/login");

            let scripted = page.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                scripted.set_url("https://demo.example.com/web/index.php/dashboard/index");
            });

            let waits = Waits::new(&page);
            let opts = WaitOptions::navigation().with_poll_interval(10);
            let result = waits.url_matches(&UrlPattern::Contains("/dashboard".into()), &opts);
            assert!(result.is_ok());
        }

        #[test]
        fn test_url_wait_times_out_without_navigation() {
            let page = Page::new_mock();
            page.set_url("https://demo.example.com/web/index.php/auth/login");

            let waits = Waits::new(&page);
            let opts = WaitOptions::new().with_timeout(200).with_poll_interval(10);
            let result = waits.url_matches(&UrlPattern::Contains("/dashboard".into()), &opts);
            assert!(matches!(result, Err(E2eError::Timeout { .. })));
        }

        #[test]
        fn test_network_idle_settles_after_activity_stops() {
            let page = Page::new_mock();

            let scripted = page.clone();
            std::thread::spawn(move || {
                for _ in 0..5 {
                    std::thread::sleep(Duration::from_millis(20));
                    scripted.bump_resource_count();
                }
            });

            let waits = Waits::new(&page);
            let opts = WaitOptions::new().with_timeout(5000).with_poll_interval(10);
            assert!(waits.network_idle(&opts).is_ok());
        }

        #[test]
        fn test_toast_returns_locator() {
            let page = Page::new_mock();
            page.upsert_element(
                &Locator::css(ToastKind::Success.css_class()),
                ElementState::visible(),
            );

            let waits = Waits::new(&page);
            let locator = waits.toast(ToastKind::Success, &fast()).unwrap();
            assert!(locator.key().contains("oxd-toast--success"));
        }

        #[test]
        fn test_element_count_wait() {
            let page = Page::new_mock();
            let rows = Locator::css(".oxd-table-card");
            page.upsert_element(&rows, ElementState::visible().with_count(3));

            let waits = Waits::new(&page);
            assert!(waits.element_count(&rows, 3, &fast()).is_ok());
            assert!(waits.element_count(&rows, 5, &fast()).is_err());
        }

        #[test]
        fn test_enabled_and_disabled_waits() {
            let page = Page::new_mock();
            let button = Locator::new(crate::locator::Selector::role("button", "Save"));
            page.upsert_element(&button, ElementState::visible().disabled());

            let waits = Waits::new(&page);
            assert!(waits.element_disabled(&button, &fast()).is_ok());
            assert!(waits.element_enabled(&button, &fast()).is_err());
        }
    }
}
