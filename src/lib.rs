//! End-to-end UI test suite for OrangeHRM.
//!
//! The suite drives the application through a browser-automation layer and
//! is organized around a few small pieces:
//!
//! - [`config`]: environment-variable driven configuration, resolved once
//!   into an immutable [`Config`](config::Config) value
//! - [`locator`]: selector strategies and resolve-on-use locators
//! - [`wait`]: bounded condition-polling waits
//! - [`assertions`]: page-bound assertion helpers
//! - [`data`]: randomized test-data generation
//! - [`session`]: the browser session; real CDP behind the `browser`
//!   feature, a scriptable in-memory mock otherwise
//! - [`pages`]: one page-object wrapper per application screen
//! - [`harness`]: per-test fixtures and screenshot-on-failure
//!
//! ```no_run
//! use orangehrm_e2e::harness::{run_test, TestContext};
//! use orangehrm_e2e::pages::AppPage;
//! use orangehrm_e2e::result::E2eResult;
//!
//! fn main() -> E2eResult<()> {
//!     let ctx = TestContext::authenticated()?;
//!     run_test("dashboard_loads", &ctx, |ctx| {
//!         let dashboard = ctx.dashboard_page();
//!         dashboard.navigate()?;
//!         assert!(dashboard.is_page_loaded()?);
//!         Ok(())
//!     })
//! }
//! ```

#![warn(missing_docs)]

pub mod assertions;
pub mod config;
pub mod data;
pub mod harness;
pub mod locator;
pub mod pages;
pub mod result;
pub mod session;
pub mod wait;

pub use assertions::Assertions;
pub use config::{Config, Credentials, Environment};
pub use harness::{run_test, EmployeeData, LeaveRequestData, TestContext, UserData};
pub use locator::{Locator, Selector};
pub use pages::{
    AdminPage, AppPage, DashboardPage, LeavePage, LoginPage, MyInfoPage, PimPage, TimePage,
};
pub use result::{E2eError, E2eResult};
pub use session::{BrowserConfig, Page, Session};
pub use wait::{wait_for_condition, ToastKind, UrlPattern, WaitOptions, WaitResult, Waits};
