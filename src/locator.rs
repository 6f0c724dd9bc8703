//! Locator abstraction for element selection.
//!
//! A [`Locator`] is resolve-on-use data: it carries a selection strategy and
//! options, and every interaction re-resolves it against current page state.
//! Locators never cache element handles.
//!
//! The selector strategies mirror what the application's UI actually
//! requires: CSS classes (`.oxd-*`), ARIA role + accessible name,
//! placeholder substrings, visible text, label-anchored form fields and
//! input `name` attributes.

use std::time::Duration;

/// Default timeout for element-level interactions (10 seconds)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 10_000;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g. `.oxd-toast--success`)
    Css(String),
    /// ARIA role plus accessible name (e.g. button named "Login")
    Role {
        /// ARIA role
        role: String,
        /// Accessible name to match
        name: String,
    },
    /// Input/textarea placeholder substring
    Placeholder(String),
    /// Visible text content substring
    Text(String),
    /// Form field anchored to a `<label>` with the given text
    Label(String),
    /// `input[name="..."]` attribute selector
    InputName(String),
    /// XPath expression
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a role + accessible-name selector
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Create a text-content selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a label-anchored field selector
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create an `input[name=..]` selector
    #[must_use]
    pub fn input_name(name: impl Into<String>) -> Self {
        Self::InputName(name.into())
    }

    /// JavaScript expression yielding an array of all matching elements
    #[must_use]
    pub fn to_all_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::Role { role, name } => format!(
                "Array.from(document.querySelectorAll({sel:?})).filter(el => \
                 ((el.getAttribute('aria-label') || el.textContent || '').trim().includes({name:?})))",
                sel = Self::role_css(role),
            ),
            Self::Placeholder(p) => format!(
                "Array.from(document.querySelectorAll('input, textarea')).filter(el => \
                 (el.placeholder || '').includes({p:?}))"
            ),
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => \
                 el.children.length === 0 && (el.textContent || '').includes({t:?}))"
            ),
            Self::Label(l) => format!(
                "Array.from(document.querySelectorAll('label')).filter(el => \
                 (el.textContent || '').includes({l:?})).map(el => \
                 el.closest('.oxd-input-group, .oxd-grid-item, div')\
                 .querySelector('input, textarea, .oxd-select-text-input')).filter(el => el)"
            ),
            Self::InputName(n) => {
                format!("Array.from(document.querySelectorAll('input[name={n:?}]'))")
            }
            Self::XPath(x) => format!(
                "(() => {{ const r = document.evaluate({x:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
                 return out; }})()"
            ),
        }
    }

    /// JavaScript expression yielding the first matching element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::InputName(n) => format!("document.querySelector('input[name={n:?}]')"),
            other => format!("({})[0] ?? null", other.to_all_query()),
        }
    }

    /// JavaScript expression yielding the match count
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            other => format!("({}).length", other.to_all_query()),
        }
    }

    /// CSS fragment that captures a role including implicit-role tags
    fn role_css(role: &str) -> String {
        match role {
            "button" => "button, [role=\"button\"]".to_string(),
            "link" => "a, [role=\"link\"]".to_string(),
            other => format!("[role=\"{other}\"]"),
        }
    }

    /// Stable key identifying this selector; used by the mock page model
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Css(s) => format!("css:{s}"),
            Self::Role { role, name } => format!("role:{role}[{name}]"),
            Self::Placeholder(p) => format!("placeholder:{p}"),
            Self::Text(t) => format!("text:{t}"),
            Self::Label(l) => format!("label:{l}"),
            Self::InputName(n) => format!("name:{n}"),
            Self::XPath(x) => format!("xpath:{x}"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Options controlling locator resolution
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for interactions against this locator
    pub timeout: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS),
        }
    }
}

/// A locator for finding and interacting with elements
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    nth: Option<usize>,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
            options: LocatorOptions::default(),
        }
    }

    /// Shorthand for a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Restrict to the n-th match (0-based)
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Restrict to the first match
    #[must_use]
    pub const fn first(self) -> Self {
        self.nth(0)
    }

    /// Set a custom interaction timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The n-th restriction, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// Resolution options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// JavaScript expression yielding the target element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        match self.nth {
            None => self.selector.to_query(),
            Some(i) => format!("({})[{i}] ?? null", self.selector.to_all_query()),
        }
    }

    /// JavaScript expression yielding the match count
    #[must_use]
    pub fn to_count_query(&self) -> String {
        self.selector.to_count_query()
    }

    /// Stable key identifying this locator; used by the mock page model
    #[must_use]
    pub fn key(&self) -> String {
        match self.nth {
            None => self.selector.key(),
            Some(i) => format!("{}#{i}", self.selector.key()),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
