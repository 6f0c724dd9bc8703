//! Dashboard screen wrapper — the landing page after login.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;

/// The dashboard screen
#[derive(Debug)]
pub struct DashboardPage {
    page: Page,
    base_url: String,
}

impl AppPage for DashboardPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/dashboard/index"
    }
}

impl DashboardPage {
    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Dashboard heading
    #[must_use]
    pub fn dashboard_title(&self) -> Locator {
        Locator::new(Selector::text("Dashboard"))
    }

    /// All dashboard widgets
    #[must_use]
    pub fn widgets(&self) -> Locator {
        Locator::css(".orangehrm-dashboard-widget")
    }

    /// A quick-launch button by name
    #[must_use]
    pub fn quick_launch_button(&self, name: &str) -> Locator {
        Locator::new(Selector::role("button", name))
    }

    /// Click the Assign Leave quick action
    pub fn click_assign_leave(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("Assign Leave"))
    }

    /// Click the Leave List quick action
    pub fn click_leave_list(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("Leave List"))
    }

    /// Click the Timesheets quick action
    pub fn click_timesheets(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("Timesheets"))
    }

    /// Click the Apply Leave quick action
    pub fn click_apply_leave(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("Apply Leave"))
    }

    /// Click the My Leave quick action
    pub fn click_my_leave(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("My Leave"))
    }

    /// Click the My Timesheet quick action
    pub fn click_my_timesheet(&self) -> E2eResult<()> {
        self.page.click(&self.quick_launch_button("My Timesheet"))
    }

    /// Number of widgets rendered
    pub fn widget_count(&self) -> E2eResult<usize> {
        self.page.count(&self.widgets())
    }

    /// Whether the dashboard heading is rendered
    pub fn is_page_loaded(&self) -> E2eResult<bool> {
        self.page.is_visible(&self.dashboard_title())
    }
}
