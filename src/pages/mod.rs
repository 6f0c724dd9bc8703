//! Page-object wrappers, one per application screen.
//!
//! Wrappers are stateless proxies over a [`crate::session::Page`]: locator
//! accessors re-resolve on every call and actions compose page primitives.
//! Retry and synchronization policy lives in the wait layer, not here.

mod admin;
mod base;
mod dashboard;
mod leave;
mod login;
mod my_info;
mod pim;
mod time;

pub use admin::{AdminPage, NewUser};
pub use base::AppPage;
pub use dashboard::DashboardPage;
pub use leave::{LeavePage, LeaveRequest};
pub use login::LoginPage;
pub use my_info::MyInfoPage;
pub use pim::{NewEmployee, PimPage};
pub use time::TimePage;
