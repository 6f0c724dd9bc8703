//! Login screen wrapper.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;
use crate::wait::{WaitOptions, Waits};

/// The authentication screen
#[derive(Debug)]
pub struct LoginPage {
    page: Page,
    base_url: String,
}

impl AppPage for LoginPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/auth/login"
    }
}

impl LoginPage {
    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Username input field
    #[must_use]
    pub fn username_input(&self) -> Locator {
        Locator::new(Selector::input_name("username"))
    }

    /// Password input field
    #[must_use]
    pub fn password_input(&self) -> Locator {
        Locator::new(Selector::input_name("password"))
    }

    /// Login button
    #[must_use]
    pub fn login_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Login"))
    }

    /// Error shown on failed login or missing fields
    #[must_use]
    pub fn error_message(&self) -> Locator {
        Locator::css(".oxd-alert-content-text, .oxd-input-field-error-message").first()
    }

    /// Forgot-password link
    #[must_use]
    pub fn forgot_password_link(&self) -> Locator {
        Locator::new(Selector::text("Forgot your password?"))
    }

    /// Page heading
    #[must_use]
    pub fn page_title(&self) -> Locator {
        Locator::css(".oxd-text--h5")
    }

    /// Type the username
    pub fn enter_username(&self, username: &str) -> E2eResult<()> {
        self.page.fill(&self.username_input(), username)
    }

    /// Type the password
    pub fn enter_password(&self, password: &str) -> E2eResult<()> {
        self.page.fill(&self.password_input(), password)
    }

    /// Click the login button once it is visible
    pub fn click_login(&self) -> E2eResult<()> {
        Waits::new(&self.page).element_visible(
            &self.login_button(),
            &WaitOptions::new().with_timeout(5_000),
        )?;
        self.page.click(&self.login_button())
    }

    /// Full login: fill both fields and submit
    pub fn login(&self, username: &str, password: &str) -> E2eResult<()> {
        self.enter_username(username)?;
        self.enter_password(password)?;
        self.click_login()
    }

    /// Text of the login error
    pub fn error_text(&self) -> E2eResult<String> {
        self.page.text_content(&self.error_message())
    }

    /// Click the forgot-password link
    pub fn click_forgot_password(&self) -> E2eResult<()> {
        self.page.click(&self.forgot_password_link())
    }

    /// Whether the title and login button are rendered
    pub fn is_page_loaded(&self) -> E2eResult<bool> {
        Ok(self.page.is_visible(&self.page_title())?
            && self.page.is_visible(&self.login_button())?)
    }
}
