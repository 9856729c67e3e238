//! Staffbot
//!
//! Telegram staff-management bot backed by Yandex Tracker as the system of
//! record. Personnel of seven ranked roles drive HR flows - employee,
//! company and warehouse records, shifts, staffing requests - from
//! inline-keyboard menus; every button press routes to one templated call
//! against the tracker.
//!
//! # Architecture
//!
//! ```text
//! Telegram ──► Dispatcher ──► Router ──► Domain Managers ──► Tracker API
//!                 │             │
//!                 │             ├── Role Resolver (admin override + lookup)
//!                 │             └── Menu formatters (text + buttons)
//!                 └── Session store (last message id + cached role)
//! ```

pub mod config;
pub mod error;
pub mod managers;
pub mod menu;
pub mod records;
pub mod roles;
pub mod router;
pub mod session;
pub mod telegram;
pub mod tracker;

#[cfg(test)]
mod router_tests;

pub use config::Config;
pub use error::TrackerError;
pub use managers::{
    CityManager, CompanyManager, EmployeeManager, RequestManager, ShiftManager, WarehouseManager,
};
pub use records::{
    CityRecord, CompanyRecord, EmployeeRecord, RequestRecord, ShiftRecord, WarehouseRecord,
};
pub use roles::{has_permission, Role, RoleResolver};
pub use router::{Action, RenderInstruction, Router};
pub use session::SessionStore;
pub use tracker::{Issue, IssueApi, IssueUpdate, NewIssue, TrackerClient};
