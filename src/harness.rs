//! Test fixtures and session setup.
//!
//! [`TestContext`] is the per-test fixture: it owns a fresh session, a
//! page, and the resolved configuration. Sessions are never shared across
//! tests. [`run_test`] wraps a test body and captures a screenshot when it
//! fails, best-effort.

use crate::config::Config;
use crate::data;
use crate::pages::{
    AdminPage, AppPage, DashboardPage, LeavePage, LoginPage, MyInfoPage, PimPage, TimePage,
};
use crate::result::E2eResult;
use crate::session::{BrowserConfig, Page, Session};
use crate::wait::{UrlPattern, WaitOptions, Waits};
use std::sync::Once;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install the tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Randomized employee fields for PIM tests
#[derive(Debug, Clone)]
pub struct EmployeeData {
    /// First name
    pub first_name: String,
    /// Middle name
    pub middle_name: String,
    /// Last name
    pub last_name: String,
    /// Employee id
    pub employee_id: String,
}

impl EmployeeData {
    /// Fresh randomized employee
    #[must_use]
    pub fn random() -> Self {
        let (first_name, last_name) = data::random_full_name();
        Self {
            first_name: first_name.to_string(),
            middle_name: data::random_string(6),
            last_name: last_name.to_string(),
            employee_id: data::random_employee_id(),
        }
    }

    /// "First Last" as it appears in search results
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Randomized account fields for Admin tests
#[derive(Debug, Clone)]
pub struct UserData {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
    /// User role
    pub role: String,
    /// Account status
    pub status: String,
}

impl UserData {
    /// Fresh randomized user account
    #[must_use]
    pub fn random() -> Self {
        Self {
            username: data::random_username("testuser"),
            password: data::random_password(12),
            role: "ESS".to_string(),
            status: "Enabled".to_string(),
        }
    }
}

/// Randomized fields for Leave tests
#[derive(Debug, Clone)]
pub struct LeaveRequestData {
    /// Leave type label
    pub leave_type: String,
    /// Start date
    pub from_date: String,
    /// End date
    pub to_date: String,
    /// Comments, unique per run
    pub comments: String,
}

impl LeaveRequestData {
    /// Fresh randomized leave request
    #[must_use]
    pub fn random() -> Self {
        let (from_date, to_date) = data::random_date_range(1, 3);
        Self {
            leave_type: "CAN - Vacation".to_string(),
            from_date,
            to_date,
            comments: format!("Test leave request {}", data::unique_timestamp()),
        }
    }
}

/// Per-test fixture: owns the session, a page and the configuration
#[derive(Debug)]
pub struct TestContext {
    config: Config,
    session: Session,
    page: Page,
}

impl TestContext {
    /// Fresh session and page, configuration from the environment
    pub fn new() -> E2eResult<Self> {
        Self::with_config(Config::from_env())
    }

    /// Fresh session and page with an explicit configuration
    pub fn with_config(config: Config) -> E2eResult<Self> {
        init_tracing();
        let session = Session::launch(BrowserConfig::from_config(&config))?;
        let page = session.new_page()?;
        Ok(Self {
            config,
            session,
            page,
        })
    }

    /// Fresh context already logged in as the configured admin.
    ///
    /// Navigates to the login page, submits the configured credentials and
    /// waits for the dashboard URL.
    pub fn authenticated() -> E2eResult<Self> {
        let ctx = Self::new()?;
        ctx.login_as_admin()?;
        Ok(ctx)
    }

    /// Log in with the configured credentials and wait for the dashboard
    pub fn login_as_admin(&self) -> E2eResult<()> {
        let login = self.login_page();
        login.navigate()?;
        login.login(self.config.username(), self.config.password())?;
        Waits::new(&self.page).url_matches(
            &UrlPattern::Contains("/dashboard".into()),
            &WaitOptions::navigation(),
        )?;
        info!(username = self.config.username(), "logged in");
        Ok(())
    }

    /// The resolved configuration
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The page handle
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Login page object
    #[must_use]
    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.page.clone(), &self.config)
    }

    /// Dashboard page object
    #[must_use]
    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(self.page.clone(), &self.config)
    }

    /// PIM page object
    #[must_use]
    pub fn pim_page(&self) -> PimPage {
        PimPage::new(self.page.clone(), &self.config)
    }

    /// Admin page object
    #[must_use]
    pub fn admin_page(&self) -> AdminPage {
        AdminPage::new(self.page.clone(), &self.config)
    }

    /// Leave page object
    #[must_use]
    pub fn leave_page(&self) -> LeavePage {
        LeavePage::new(self.page.clone(), &self.config)
    }

    /// Time page object
    #[must_use]
    pub fn time_page(&self) -> TimePage {
        TimePage::new(self.page.clone(), &self.config)
    }

    /// My Info page object
    #[must_use]
    pub fn my_info_page(&self) -> MyInfoPage {
        MyInfoPage::new(self.page.clone(), &self.config)
    }

    /// Tear down the session
    pub fn close(self) -> E2eResult<()> {
        self.session.close()
    }
}

/// Run a test body against a context; on failure, capture a screenshot to
/// `<screenshots_dir>/<name>.png` and propagate the original error.
///
/// Screenshot capture is best-effort: a capture failure is logged and
/// never replaces the test's own error.
pub fn run_test<F>(name: &str, ctx: &TestContext, body: F) -> E2eResult<()>
where
    F: FnOnce(&TestContext) -> E2eResult<()>,
{
    info!(test = name, "running");
    match body(ctx) {
        Ok(()) => Ok(()),
        Err(err) => {
            if ctx.config.screenshot_on_failure {
                if let Err(capture_err) = capture_failure_screenshot(name, ctx) {
                    warn!(test = name, error = %capture_err, "screenshot capture failed");
                }
            }
            Err(err)
        }
    }
}

fn capture_failure_screenshot(name: &str, ctx: &TestContext) -> E2eResult<()> {
    let bytes = ctx.page.screenshot()?;
    std::fs::create_dir_all(&ctx.config.screenshots_dir)?;
    let path = ctx.config.screenshots_dir.join(format!("{name}.png"));
    std::fs::write(&path, bytes)?;
    info!(test = name, path = %path.display(), "screenshot saved");
    Ok(())
}
