//! PIM (personnel management) screen wrapper: add, search and delete
//! employees.

use crate::config::Config;
use crate::locator::{Locator, Selector};
use crate::pages::AppPage;
use crate::result::E2eResult;
use crate::session::Page;

/// Employee fields for the add-employee form
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    /// First name (required)
    pub first_name: String,
    /// Middle name (optional)
    pub middle_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Employee id; empty keeps the auto-generated one
    pub employee_id: String,
}

/// The PIM employee-list and add-employee screens
#[derive(Debug)]
pub struct PimPage {
    page: Page,
    base_url: String,
}

impl AppPage for PimPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "web/index.php/pim/viewEmployeeList"
    }
}

impl PimPage {
    /// Path of the add-employee form
    pub const ADD_EMPLOYEE_PATH: &'static str = "web/index.php/pim/addEmployee";

    /// Wrap a page handle
    #[must_use]
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Navigate directly to the add-employee form
    pub fn navigate_to_add_employee(&self) -> E2eResult<()> {
        self.navigate_to(Self::ADD_EMPLOYEE_PATH)
    }

    /// Open the add-employee form through the menu
    pub fn open_add_employee_via_menu(&self) -> E2eResult<()> {
        self.click_menu_item("PIM")?;
        self.page
            .click(&Locator::new(Selector::role("link", "Add Employee")))
    }

    // -- add-employee form --

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

    /// Employee id input; the form has no name attribute on it, it is the
    /// fifth input in the grid
    #[must_use]
    pub fn employee_id_input(&self) -> Locator {
        Locator::css(".oxd-grid input").nth(4)
    }

    /// Save button
    #[must_use]
    pub fn save_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Save"))
    }

    /// Cancel button
    #[must_use]
    pub fn cancel_button(&self) -> Locator {
        Locator::new(Selector::role("button", "Cancel"))
    }

    /// First inline validation error on the form
    #[must_use]
    pub fn required_field_error(&self) -> Locator {
        Locator::css(".oxd-input-field-error-message").first()
    }

    // -- employee list --

    /// Employee name search input
    #[must_use]
    pub fn name_search_input(&self) -> Locator {
        Locator::new(Selector::placeholder("Type for hints")).first()
    }

    /// Employee id search input
    #[must_use]
    pub fn id_search_input(&self) -> Locator {
        Locator::css(".oxd-grid input").nth(1)
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

    /// Result table body
    #[must_use]
    pub fn employee_table(&self) -> Locator {
        Locator::css(".oxd-table-body")
    }

    /// Result table rows
    #[must_use]
    pub fn employee_rows(&self) -> Locator {
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

    // -- actions --

    /// Fill the add-employee form and save
    pub fn add_employee(&self, employee: &NewEmployee) -> E2eResult<()> {
        self.page.fill(&self.first_name_input(), &employee.first_name)?;
        if !employee.middle_name.is_empty() {
            self.page
                .fill(&self.middle_name_input(), &employee.middle_name)?;
        }
        self.page.fill(&self.last_name_input(), &employee.last_name)?;
        if !employee.employee_id.is_empty() {
            self.page
                .fill(&self.employee_id_input(), &employee.employee_id)?;
        }
        self.page.click(&self.save_button())
    }

    /// Search the employee list by name
    pub fn search_employee_by_name(&self, full_name: &str) -> E2eResult<()> {
        self.page.fill(&self.name_search_input(), full_name)?;
        self.page.click(&self.search_button())
    }

    /// Search the employee list by id
    pub fn search_employee_by_id(&self, employee_id: &str) -> E2eResult<()> {
        self.page.fill(&self.id_search_input(), employee_id)?;
        self.page.click(&self.search_button())
    }

    /// Clear the search filters
    pub fn reset_search(&self) -> E2eResult<()> {
        self.page.click(&self.reset_button())
    }

    /// Tick the checkbox on a result row
    pub fn select_employee_row(&self, row_index: usize) -> E2eResult<()> {
        self.page.click(&self.row_checkbox(row_index))
    }

    /// Delete the selected rows and confirm
    pub fn delete_selected(&self) -> E2eResult<()> {
        self.page.click(&self.delete_button())?;
        self.page.click(&self.confirm_delete_button())
    }

    /// Number of rows in the result table
    pub fn employee_count(&self) -> E2eResult<usize> {
        self.page.count(&self.employee_rows())
    }

    /// Auto-generated employee id on the add form
    pub fn employee_id_value(&self) -> E2eResult<String> {
        self.page.input_value(&self.employee_id_input())
    }

    /// Whether the browser is on the add-employee form
    pub fn is_on_add_employee_page(&self) -> E2eResult<bool> {
        Ok(self.page.current_url()?.contains("/pim/addEmployee"))
    }
}
