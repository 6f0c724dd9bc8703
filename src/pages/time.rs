//! Time screen wrapper: timesheet editing and submission.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;

/// The Time / timesheet screens
#[derive(Debug)]
pub struct TimePage {
    page: Page,
    base_url: String,
}

impl AppPage for TimePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/time/viewEmployeeTimesheet"
    }
}

impl TimePage {
    /// Path of the current user's own timesheet
    pub const MY_TIMESHEET_PATH: &'static str = "web/index.php/time/viewMyTimesheet";

    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Navigate to the current user's timesheet
    pub fn navigate_to_my_timesheet(&self) -> E2eResult<()> {
        self.navigate_to(Self::MY_TIMESHEET_PATH)
    }

    /// Edit button
    #[must_use]
    pub fn edit_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Edit"))
    }

    /// Submit button
    #[must_use]
    pub fn submit_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Submit"))
    }

    /// Save button
    #[must_use]
    pub fn save_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Save"))
    }

    /// Add-row button
    #[must_use]
    pub fn add_row_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Add Row"))
    }

    /// Project autocomplete input
    #[must_use]
    pub fn project_input(&self) -> Locator {
        Locator::new(Selector::placeholder("Type for hints")).first()
    }

    /// Activity dropdown
    #[must_use]
    pub fn activity_dropdown(&self) -> Locator {
        Locator::css(".oxd-select-text-input").first()
    }

    /// Hour cell for a day column (0 = Monday)
    #[must_use]
    pub fn hours_input(&self, day_index: usize) -> Locator {
        Locator::css(".orangehrm-timesheet-table input").nth(day_index)
    }

    /// Timesheet status indicator
    #[must_use]
    pub fn status_indicator(&self) -> Locator {
        Locator::css(".orangehrm-timesheet-status")
    }

    /// Switch the timesheet into edit mode
    pub fn click_edit(&self) -> E2eResult<()> {
        self.page.click(&self.edit_button())
    }

    /// Add a timesheet row
    pub fn add_timesheet_row(&self) -> E2eResult<()> {
        self.page.click(&self.add_row_button())
    }

    /// Type a project name and pick the first suggestion
    pub fn enter_project(&self, project_name: &str) -> E2eResult<()> {
        self.page.fill(&self.project_input(), project_name)?;
        self.page
            .click(&Locator::new(Selector::css(".oxd-autocomplete-option")).first())
    }

    /// Pick an activity from the dropdown
    pub fn select_activity(&self, activity: &str) -> E2eResult<()> {
        self.select_dropdown_option(&self.activity_dropdown(), activity)
    }

    /// Enter hours for one day of the week
    pub fn enter_hours(&self, day_index: usize, hours: &str) -> E2eResult<()> {
        self.page.fill(&self.hours_input(day_index), hours)
    }

    /// Save the timesheet draft
    pub fn save_timesheet(&self) -> E2eResult<()> {
        self.page.click(&self.save_button())
    }

    /// Submit the timesheet for approval
    pub fn submit_timesheet(&self) -> E2eResult<()> {
        self.page.click(&self.submit_button())
    }

    /// Current timesheet status text
    pub fn timesheet_status(&self) -> E2eResult<String> {
        self.page.text_content(&self.status_indicator())
    }

    /// Whether the timesheet is in an editable state
    pub fn is_editable(&self) -> E2eResult<bool> {
        self.page.is_visible(&self.save_button())
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::session::{ElementState, PageAction};

    #[test]
    fn test_edit_fill_save_sequence() {
        let time = TimePage::new(Page::new_mock(), &Config::default());
        for locator in [
            time.edit_button(),
            time.hours_input(0),
            time.hours_input(1),
            time.save_button(),
        ] {
            time.page().upsert_element(&locator, ElementState::visible());
        }

        time.click_edit().unwrap();
        time.enter_hours(0, "8").unwrap();
        time.enter_hours(1, "6").unwrap();
        time.save_timesheet().unwrap();

        let actions = time.page().actions();
        assert_eq!(actions.len(), 4);
        assert!(matches!(&actions[1], PageAction::Fill { value, .. } if value == "8"));
    }

    #[test]
    fn test_status_readback_and_editability() {
        let time = TimePage::new(Page::new_mock(), &Config::default());
        time.page().upsert_element(
            &time.status_indicator(),
            ElementState::visible().with_text("Status: Not Submitted"),
        );
        assert!(time.timesheet_status().unwrap().contains("Not Submitted"));
        assert!(!time.is_editable().unwrap());

        time.page()
            .upsert_element(&time.save_button(), ElementState::visible());
        assert!(time.is_editable().unwrap());
    }

    #[test]
    fn test_project_autocomplete_picks_first_option() {
        let time = TimePage::new(Page::new_mock(), &Config::default());
        time.page()
            .upsert_element(&time.project_input(), ElementState::visible());
        time.page().upsert_element(
            &Locator::new(Selector::css(".oxd-autocomplete-option")).first(),
            ElementState::visible(),
        );

        time.enter_project("ACME").unwrap();
        assert_eq!(time.page().actions().len(), 2);
    }
}
