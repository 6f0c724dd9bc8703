//! Admin screen wrapper: system user management.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;

/// Fields for the add-user form
#[derive(Debug, Clone)]
pub struct NewUser {
    /// User role: "Admin" or "ESS"
    pub role: String,
    /// Employee the account belongs to (autocomplete)
    pub employee_name: String,
    /// Account status: "Enabled" or "Disabled"
    pub status: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

/// The Admin system-users screen
#[derive(Debug)]
pub struct AdminPage {
    page: Page,
    base_url: String,
}

impl AppPage for AdminPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/admin/viewSystemUsers"
    }
}

impl AdminPage {
    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Add-user button above the list
    #[must_use]
    pub fn add_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Add"))
    }

    /// User role dropdown on the add form
    #[must_use]
    pub fn user_role_dropdown(&self) -> Locator {
        Locator::new(Selector::label("User Role"))
    }

    /// Employee name autocomplete input
    #[must_use]
    pub fn employee_name_input(&self) -> Locator {
        Locator::new(Selector::placeholder("Type for hints")).first()
    }

    /// Status dropdown
    #[must_use]
    pub fn status_dropdown(&self) -> Locator {
        Locator::new(Selector::label("Status"))
    }

    /// Username input
    #[must_use]
    pub fn username_input(&self) -> Locator {
        Locator::new(Selector::label("Username"))
    }

    /// Password input
    #[must_use]
    pub fn password_input(&self) -> Locator {
        Locator::new(Selector::label("Password"))
    }

    /// Confirm-password input
    #[must_use]
    pub fn confirm_password_input(&self) -> Locator {
        Locator::new(Selector::label("Confirm Password"))
    }

    /// Save button
    #[must_use]
    pub fn save_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Save"))
    }

    /// Search button
    #[must_use]
    pub fn search_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Search"))
    }

    /// Reset button
    #[must_use]
    pub fn reset_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Reset"))
    }

    /// Users table body
    #[must_use]
    pub fn users_table(&self) -> Locator {
        Locator::css(".oxd-table-body")
    }

    /// Users table rows
    #[must_use]
    pub fn user_rows(&self) -> Locator {
        Locator::css(".oxd-table-card")
    }

    /// Row checkbox at `row_index`
    #[must_use]
    pub fn row_checkbox(&self, row_index: usize) -> Locator {
        Locator::css(".oxd-table-card .oxd-checkbox-input").nth(row_index)
    }

    /// Delete-selected button
    #[must_use]
    pub fn delete_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Delete Selected"))
    }

    /// Confirmation button in the delete dialog
    #[must_use]
    pub fn confirm_delete_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Yes, Delete"))
    }

    /// Open the add-user form
    pub fn click_add_user(&self) -> E2eResult<()> {
        self.page.click(&self.add_button())
    }

    /// Pick the first autocomplete suggestion after typing a name
    pub fn enter_employee_name(&self, name: &str) -> E2eResult<()> {
        self.page.fill(&self.employee_name_input(), name)?;
        self.page
            .click(&Locator::new(Selector::css(".oxd-autocomplete-option")).first())
    }

    /// Fill the whole add-user form and save
    pub fn add_user(&self, user: &NewUser) -> E2eResult<()> {
        self.select_dropdown_option(&self.user_role_dropdown(), &user.role)?;
        self.enter_employee_name(&user.employee_name)?;
        self.select_dropdown_option(&self.status_dropdown(), &user.status)?;
        self.page.fill(&self.username_input(), &user.username)?;
        self.page.fill(&self.password_input(), &user.password)?;
        self.page
            .fill(&self.confirm_password_input(), &user.password)?;
        self.page.click(&self.save_button())
    }

    /// Search the user list by username
    pub fn search_user_by_username(&self, username: &str) -> E2eResult<()> {
        self.page.fill(&self.username_input(), username)?;
        self.page.click(&self.search_button())
    }

    /// Clear the search filters
    pub fn reset_search(&self) -> E2eResult<()> {
        self.page.click(&self.reset_button())
    }

    /// Tick the checkbox on a result row
    pub fn select_user_row(&self, row_index: usize) -> E2eResult<()> {
        self.page.click(&self.row_checkbox(row_index))
    }

    /// Delete the selected users and confirm
    pub fn delete_selected_user(&self) -> E2eResult<()> {
        self.page.click(&self.delete_button())?;
        self.page.click(&self.confirm_delete_button())
    }

    /// Number of rows in the user table
    pub fn user_count(&self) -> E2eResult<usize> {
        self.page.count(&self.user_rows())
    }

    /// Whether a username appears anywhere in the table
    pub fn user_exists_in_table(&self, username: &str) -> E2eResult<bool> {
        Ok(self.page.text_content(&self.users_table())?.contains(username))
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::session::{ElementState, PageAction};

    fn seeded_admin() -> AdminPage {
        let admin = AdminPage::new(Page::new_mock(), &Config::default());
        for locator in [
            admin.user_role_dropdown(),
            admin.employee_name_input(),
            admin.status_dropdown(),
            admin.username_input(),
            admin.password_input(),
            admin.confirm_password_input(),
            admin.save_button(),
            Locator::new(Selector::role("option", "Admin")),
            Locator::new(Selector::role("option", "Enabled")),
            Locator::new(Selector::css(".oxd-autocomplete-option")).first(),
        ] {
            admin
                .page()
                .upsert_element(&locator, ElementState::visible());
        }
        admin
    }

    #[test]
    fn test_add_user_fills_password_twice() {
        let admin = seeded_admin();
        let user = NewUser {
            role: "Admin".to_string(),
            employee_name: "John Smith".to_string(),
            status: "Enabled".to_string(),
            username: "qa_abcdef".to_string(),
            password: "S3cret!pass".to_string(),
        };
        admin.add_user(&user).unwrap();

        let fills: Vec<String> = admin
            .page()
            .actions()
            .into_iter()
            .filter_map(|a| match a {
                PageAction::Fill { value, .. } => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec!["John Smith", "qa_abcdef", "S3cret!pass", "S3cret!pass"]
        );
    }

    #[test]
    fn test_add_user_ends_with_save() {
        let admin = seeded_admin();
        let user = NewUser {
            role: "Admin".to_string(),
            employee_name: "John Smith".to_string(),
            status: "Enabled".to_string(),
            username: "qa_user".to_string(),
            password: "pw".to_string(),
        };
        admin.add_user(&user).unwrap();
        let actions = admin.page().actions();
        assert!(matches!(actions.last(), Some(PageAction::Click { locator })
            if *locator == admin.save_button().key()));
    }

    #[test]
    fn test_user_exists_in_table() {
        let admin = AdminPage::new(Page::new_mock(), &Config::default());
        admin.page().upsert_element(
            &admin.users_table(),
            ElementState::visible().with_text("qa_abcdef ESS Enabled"),
        );
        assert!(admin.user_exists_in_table("qa_abcdef").unwrap());
        assert!(!admin.user_exists_in_table("other_user").unwrap());
    }

    #[test]
    fn test_search_then_delete_flow() {
        let admin = AdminPage::new(Page::new_mock(), &Config::default());
        for locator in [
            admin.username_input(),
            admin.search_button(),
            admin.row_checkbox(0),
            admin.delete_button(),
            admin.confirm_delete_button(),
        ] {
            admin
                .page()
                .upsert_element(&locator, ElementState::visible());
        }

        admin.search_user_by_username("qa_user").unwrap();
        admin.select_user_row(0).unwrap();
        admin.delete_selected_user().unwrap();
        assert_eq!(admin.page().actions().len(), 5);
    }
}
