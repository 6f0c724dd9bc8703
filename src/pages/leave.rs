//! Leave screen wrapper: applying for, approving and searching leave.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;

/// Fields for the apply-leave form
#[derive(Debug, Clone)]
pub struct LeaveRequest {
    /// Leave type shown in the dropdown, e.g. "CAN - Vacation"
    pub leave_type: String,
    /// Start date, `YYYY-MM-DD`
    pub from_date: String,
    /// End date, `YYYY-MM-DD`
    pub to_date: String,
    /// Optional comments
    pub comments: String,
}

/// The Leave list and apply-leave screens
#[derive(Debug)]
pub struct LeavePage {
    page: Page,
    base_url: String,
}

impl AppPage for LeavePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/leave/viewLeaveList"
    }
}

impl LeavePage {
    /// Path of the apply-leave form
    pub const APPLY_PATH: &'static str = "web/index.php/leave/applyLeave";

    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Navigate directly to the apply-leave form
    pub fn navigate_to_apply(&self) -> E2eResult<()> {
        self.navigate_to(Self::APPLY_PATH)
    }

    /// Leave type dropdown
    #[must_use]
    pub fn leave_type_dropdown(&self) -> Locator {
        Locator::new(Selector::label("Leave Type"))
    }

    /// From-date input on the form
    #[must_use]
    pub fn from_date_input(&self) -> Locator {
        Locator::new(Selector::label("From Date"))
    }

    /// To-date input on the form
    #[must_use]
    pub fn to_date_input(&self) -> Locator {
        Locator::new(Selector::label("To Date"))
    }

    /// Comments textarea
    #[must_use]
    pub fn comments_textarea(&self) -> Locator {
        Locator::css("textarea").first()
    }

    /// Apply button
    #[must_use]
    pub fn apply_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Apply"))
    }

    /// Approve button on a list row
    #[must_use]
    pub fn approve_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Approve")).first()
    }

    /// Reject button on a list row
    #[must_use]
    pub fn reject_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Reject")).first()
    }

    /// From-date search filter
    #[must_use]
    pub fn from_date_search_input(&self) -> Locator {
        Locator::css(".oxd-form input").first()
    }

    /// To-date search filter
    #[must_use]
    pub fn to_date_search_input(&self) -> Locator {
        Locator::css(".oxd-form input").nth(1)
    }

    /// Search button
    #[must_use]
    pub fn search_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Search"))
    }

    /// Leave list rows
    #[must_use]
    pub fn leave_rows(&self) -> Locator {
        Locator::css(".oxd-table-card")
    }

    /// Status cell of a row (sixth column)
    #[must_use]
    pub fn status_cell(&self, row_index: usize) -> Locator {
        Locator::css(".oxd-table-card .oxd-table-cell").nth(row_index * 9 + 5)
    }

    /// Fill the apply-leave form and submit
    pub fn apply_leave(&self, request: &LeaveRequest) -> E2eResult<()> {
        self.select_dropdown_option(&self.leave_type_dropdown(), &request.leave_type)?;
        self.page.fill(&self.from_date_input(), &request.from_date)?;
        self.page.fill(&self.to_date_input(), &request.to_date)?;
        if !request.comments.is_empty() {
            self.page
                .fill(&self.comments_textarea(), &request.comments)?;
        }
        self.page.click(&self.apply_button())
    }

    /// Approve the first leave record in the list
    pub fn approve_first(&self) -> E2eResult<()> {
        self.page.click(&self.approve_button())
    }

    /// Reject the first leave record in the list
    pub fn reject_first(&self) -> E2eResult<()> {
        self.page.click(&self.reject_button())
    }

    /// Filter the leave list by date range
    pub fn search_by_date_range(&self, from_date: &str, to_date: &str) -> E2eResult<()> {
        self.page.fill(&self.from_date_search_input(), from_date)?;
        self.page.fill(&self.to_date_search_input(), to_date)?;
        self.page.click(&self.search_button())
    }

    /// Number of leave records listed
    pub fn leave_count(&self) -> E2eResult<usize> {
        self.page.count(&self.leave_rows())
    }

    /// Status text of a row
    pub fn leave_status(&self, row_index: usize) -> E2eResult<String> {
        self.page.text_content(&self.status_cell(row_index))
    }
}
