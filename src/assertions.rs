//! Page-bound assertion helpers.
//!
//! Each helper waits (bounded) for an observable page state and converts a
//! miss into [`E2eError::AssertionFailed`] with a diagnostic message. The
//! first failed assertion terminates the test through `?`.

use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::session::Page;
use crate::wait::{ToastKind, UrlPattern, WaitOptions, Waits};

/// Assertion helpers bound to a page handle
#[derive(Debug)]
pub struct Assertions<'a> {
    page: &'a Page,
    waits: Waits<'a>,
}

fn failed(message: String) -> E2eError {
    E2eError::AssertionFailed { message }
}

impl<'a> Assertions<'a> {
    /// Bind assertions to a page
    #[must_use]
    pub const fn new(page: &'a Page) -> Self {
        Self {
            page,
            waits: Waits::new(page),
        }
    }

    fn check(&self, result: E2eResult<crate::wait::WaitResult>, message: &str) -> E2eResult<()> {
        match result {
            Ok(_) => Ok(()),
            Err(E2eError::Timeout { ms, .. }) => {
                Err(failed(format!("{message} (after {ms}ms)")))
            }
            Err(other) => Err(other),
        }
    }

    /// The browser is on the login page and its title is rendered
    pub fn on_login_page(&self) -> E2eResult<()> {
        self.check(
            self.waits.url_matches(
                &UrlPattern::Contains("/auth/login".into()),
                &WaitOptions::navigation(),
            ),
            "expected to be on the login page",
        )?;
        self.element_visible(&Locator::css(".oxd-text--h5"))
    }

    /// The browser is on the dashboard
    pub fn on_dashboard(&self) -> E2eResult<()> {
        self.check(
            self.waits.url_matches(
                &UrlPattern::Contains("/dashboard".into()),
                &WaitOptions::navigation(),
            ),
            "expected to be on the dashboard",
        )
    }

    /// A success toast appeared, optionally containing `message`
    pub fn success_message(&self, message: Option<&str>) -> E2eResult<()> {
        let toast = self
            .waits
            .toast(ToastKind::Success, &WaitOptions::default())
            .map_err(|_| failed("expected a success toast".to_string()))?;
        if let Some(expected) = message {
            self.element_has_text(&toast, expected)?;
        }
        Ok(())
    }

    /// An error toast or inline alert appeared, optionally containing `message`
    pub fn error_message(&self, message: Option<&str>) -> E2eResult<()> {
        let alert = Locator::css(".oxd-toast--error, .oxd-alert-content-text");
        self.check(
            self.waits.element_visible(&alert, &WaitOptions::default()),
            "expected an error message",
        )?;
        if let Some(expected) = message {
            self.element_has_text(&alert, expected)?;
        }
        Ok(())
    }

    /// A "Required" field validation error is shown
    pub fn required_field_error(&self) -> E2eResult<()> {
        self.validation_error("Required")
    }

    /// A field validation error containing `text` is shown
    pub fn validation_error(&self, text: &str) -> E2eResult<()> {
        let error = Locator::css(".oxd-input-field-error-message");
        self.element_visible(&error)?;
        self.element_has_text(&error, text)
    }

    /// The element is visible
    pub fn element_visible(&self, locator: &Locator) -> E2eResult<()> {
        self.check(
            self.waits.element_visible(locator, &WaitOptions::default()),
            &format!("expected {locator} to be visible"),
        )
    }

    /// The element is hidden or absent
    pub fn element_hidden(&self, locator: &Locator) -> E2eResult<()> {
        self.check(
            self.waits.element_hidden(locator, &WaitOptions::default()),
            &format!("expected {locator} to be hidden"),
        )
    }

    /// The element's text contains `expected`
    pub fn element_has_text(&self, locator: &Locator, expected: &str) -> E2eResult<()> {
        self.check(
            self.waits
                .element_contains_text(locator, expected, &WaitOptions::default()),
            &format!("expected {locator} to contain {expected:?}"),
        )
    }

    /// The locator matches exactly `expected` elements
    pub fn element_count(&self, locator: &Locator, expected: usize) -> E2eResult<()> {
        self.check(
            self.waits
                .element_count(locator, expected, &WaitOptions::default()),
            &format!("expected {expected} matches for {locator}"),
        )
    }

    /// The page URL contains `fragment`
    pub fn url_contains(&self, fragment: &str) -> E2eResult<()> {
        self.check(
            self.waits.url_matches(
                &UrlPattern::Contains(fragment.to_string()),
                &WaitOptions::navigation(),
            ),
            &format!("expected url to contain {fragment:?}"),
        )
    }

    /// The "No Records Found" message is shown
    pub fn no_records_found(&self) -> E2eResult<()> {
        let message = Locator::css(".oxd-toast-content, .oxd-text");
        self.element_has_text(&message, "No Records Found")
    }

    /// The record table contains `text`
    pub fn table_contains_text(&self, text: &str) -> E2eResult<()> {
        self.element_has_text(&Locator::css(".oxd-table-body"), text)
    }

    /// The record table has exactly `expected` rows
    pub fn table_row_count(&self, expected: usize) -> E2eResult<()> {
        self.element_count(&Locator::css(".oxd-table-card"), expected)
    }

    /// The document title contains `expected`, case-insensitively
    pub fn page_title(&self, expected: &str) -> E2eResult<()> {
        let title = self.page.title()?;
        if title.to_lowercase().contains(&expected.to_lowercase()) {
            Ok(())
        } else {
            Err(failed(format!(
                "expected title to contain {expected:?}, got {title:?}"
            )))
        }
    }

    /// The element's attribute equals `expected`
    pub fn attribute_value(
        &self,
        locator: &Locator,
        attribute: &str,
        expected: &str,
    ) -> E2eResult<()> {
        self.check(
            self.waits
                .attribute_equals(locator, attribute, expected, &WaitOptions::default()),
            &format!("expected {attribute:?} of {locator} to equal {expected:?}"),
        )
    }
}
