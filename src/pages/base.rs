//! Shared page-object behavior.

use crate::locator::{Locator, Selector};
use crate::result::E2eResult;
use crate::session::Page;

/// Concerns every screen shares: navigation relative to the configured
/// base URL, the header user menu, toast notifications and the custom
/// dropdown widget.
pub trait AppPage {
    /// The underlying page handle
    fn page(&self) -> &Page;

    /// Configured application base URL
    fn base_url(&self) -> &str;

    /// Path of this screen relative to the base URL
    fn path(&self) -> &str;

    /// Absolute URL of this screen
    fn url(&self) -> String {
        format!("{}/{}", self.base_url(), self.path())
    }

    /// Navigate to this screen
    fn navigate(&self) -> E2eResult<()> {
        let url = self.url();
        self.page().goto(&url)
    }

    /// Navigate to an arbitrary path under the base URL
    fn navigate_to(&self, path: &str) -> E2eResult<()> {
        let url = format!("{}/{path}", self.base_url());
        self.page().goto(&url)
    }

    /// User dropdown in the header
    fn user_dropdown(&self) -> Locator {
        Locator::css(".oxd-userdropdown-tab")
    }

    /// Logout entry in the user dropdown
    fn logout_link(&self) -> Locator {
        Locator::new(Selector::role("menuitem", "Logout"))
    }

    /// Success toast notification
    fn success_toast(&self) -> Locator {
        Locator::css(".oxd-toast--success")
    }

    /// Error toast notification
    fn error_toast(&self) -> Locator {
        Locator::css(".oxd-toast--error")
    }

    /// Info toast notification
    fn info_toast(&self) -> Locator {
        Locator::css(".oxd-toast--info")
    }

    /// Loading spinner overlay
    fn loading_spinner(&self) -> Locator {
        Locator::css(".oxd-loading-spinner")
    }

    /// Log out through the user dropdown
    fn logout(&self) -> E2eResult<()> {
        self.page().click(&self.user_dropdown())?;
        self.page().click(&self.logout_link())
    }

    /// Click a main menu item by its visible name
    fn click_menu_item(&self, name: &str) -> E2eResult<()> {
        self.page()
            .click(&Locator::new(Selector::role("link", name)))
    }

    /// Text of the success toast
    fn success_toast_text(&self) -> E2eResult<String> {
        self.page().text_content(&self.success_toast())
    }

    /// Text of the error toast
    fn error_toast_text(&self) -> E2eResult<String> {
        self.page().text_content(&self.error_toast())
    }

    /// Pick an option from one of the application's custom dropdowns.
    ///
    /// These are not native `<select>` elements; the widget opens on click
    /// and offers `role="option"` entries.
    fn select_dropdown_option(&self, dropdown: &Locator, option: &str) -> E2eResult<()> {
        self.page().click(dropdown)?;
        self.page()
            .click(&Locator::new(Selector::role("option", option)))
    }
}
