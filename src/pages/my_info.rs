//! My Info screen wrapper: employee self-service details, profile
//! picture and document attachments.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;
use std::path::Path;

/// The My Info (personal details) screen
#[derive(Debug)]
pub struct MyInfoPage {
    page: Page,
    base_url: String,
}

impl AppPage for MyInfoPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/pim/viewMyDetails"
    }
}

impl MyInfoPage {
    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// A side tab by its visible name
    #[must_use]
    pub fn tab(&self, name: &str) -> Locator {
        Locator::new(Selector::role("link", name))
    }

    /// First name input
    #[must_use]
    pub fn first_name_input(&self) -> Locator {
        Locator::new(Selector::input_name("firstName"))
    }

    /// Middle name input
    #[must_use]
    pub fn middle_name_input(&self) -> Locator {
        Locator::new(Selector::input_name("middleName"))
    }

    /// Last name input
    #[must_use]
    pub fn last_name_input(&self) -> Locator {
        Locator::new(Selector::input_name("lastName"))
    }

    /// Nationality dropdown
    #[must_use]
    pub fn nationality_dropdown(&self) -> Locator {
        Locator::css(".oxd-select-text-input").first()
    }

    /// Marital status dropdown
    #[must_use]
    pub fn marital_status_dropdown(&self) -> Locator {
        Locator::css(".oxd-select-text-input").nth(1)
    }

    /// Male gender radio
    #[must_use]
    pub fn gender_male_radio(&self) -> Locator {
        Locator::css("input[value=\"1\"]").first()
    }

    /// Female gender radio
    #[must_use]
    pub fn gender_female_radio(&self) -> Locator {
        Locator::css("input[value=\"2\"]").first()
    }

    /// Profile picture element
    #[must_use]
    pub fn profile_picture(&self) -> Locator {
        Locator::css(".employee-image")
    }

    /// Profile picture file input
    #[must_use]
    pub fn profile_picture_input(&self) -> Locator {
        Locator::css("input[type=\"file\"]").first()
    }

    /// Save button
    #[must_use]
    pub fn save_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Save")).first()
    }

    /// Add-attachment button
    #[must_use]
    pub fn add_attachment_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Add"))
    }

    /// Attachment table rows
    #[must_use]
    pub fn attachment_rows(&self) -> Locator {
        Locator::css(".oxd-table-card")
    }

    /// Switch to a side tab
    pub fn open_tab(&self, name: &str) -> E2eResult<()> {
        self.page.click(&self.tab(name))
    }

    /// Update the name fields and save
    pub fn update_name(
        &self,
        first_name: &str,
        middle_name: &str,
        last_name: &str,
    ) -> E2eResult<()> {
        self.page.fill(&self.first_name_input(), first_name)?;
        if !middle_name.is_empty() {
            self.page.fill(&self.middle_name_input(), middle_name)?;
        }
        self.page.fill(&self.last_name_input(), last_name)?;
        self.page.click(&self.save_button())
    }

    /// Pick a nationality from the dropdown
    pub fn select_nationality(&self, nationality: &str) -> E2eResult<()> {
        self.select_dropdown_option(&self.nationality_dropdown(), nationality)
    }

    /// Pick a marital status from the dropdown
    pub fn select_marital_status(&self, status: &str) -> E2eResult<()> {
        self.select_dropdown_option(&self.marital_status_dropdown(), status)
    }

    /// Select the male gender radio
    pub fn select_gender_male(&self) -> E2eResult<()> {
        self.page.click(&self.gender_male_radio())
    }

    /// Select the female gender radio
    pub fn select_gender_female(&self) -> E2eResult<()> {
        self.page.click(&self.gender_female_radio())
    }

    /// Upload a profile picture
    pub fn upload_profile_picture(&self, file: &Path) -> E2eResult<()> {
        self.page.set_files(&self.profile_picture_input(), &[file])
    }

    /// Attach a document with an optional comment
    pub fn add_attachment(&self, file: &Path, comment: &str) -> E2eResult<()> {
        self.page.click(&self.add_attachment_button())?;
        self.page
            .set_files(&Locator::css("input[type=\"file\"]"), &[file])?;
        if !comment.is_empty() {
            self.page.fill(&Locator::css("textarea").first(), comment)?;
        }
        self.page.click(&self.save_button())
    }

    /// Number of attached documents
    pub fn attachment_count(&self) -> E2eResult<usize> {
        self.page.count(&self.attachment_rows())
    }

    /// Whether the profile picture is rendered
    pub fn is_profile_picture_visible(&self) -> E2eResult<bool> {
        self.page.is_visible(&self.profile_picture())
    }
}
