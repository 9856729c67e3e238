//! Role model and resolution
//!
//! Seven ranked roles with a fixed hierarchy used for access checks, plus
//! the resolver that maps a Telegram identity to a role through the
//! employee directory.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::records::EmployeeRecord;

/// Caller role, ordered by the fixed rank table (admin highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    ShiftSupervisor,
    Employee,
    OutsStaffManager,
    Brigadier,
    OutsEmployee,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Manager,
        Role::ShiftSupervisor,
        Role::Employee,
        Role::OutsStaffManager,
        Role::Brigadier,
        Role::OutsEmployee,
    ];

    /// Position in the hierarchy; higher rank means more access.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Admin => 7,
            Role::Manager => 6,
            Role::ShiftSupervisor => 5,
            Role::Employee => 4,
            Role::OutsStaffManager => 3,
            Role::Brigadier => 2,
            Role::OutsEmployee => 1,
        }
    }

    /// The string form stored in employee records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::ShiftSupervisor => "shift_supervisor",
            Role::Employee => "employee",
            Role::OutsStaffManager => "outs_staff_manager",
            Role::Brigadier => "brigadier",
            Role::OutsEmployee => "outs_employee",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an arbitrary stored role string. Unknown strings rank as 0 and
/// are therefore never sufficient for any check.
pub fn rank_str(role: &str) -> u8 {
    Role::parse(role).map(|role| role.rank()).unwrap_or(0)
}

/// true iff the caller's rank meets the requirement.
pub fn has_permission(user: Role, required: Role) -> bool {
    user.rank() >= required.rank()
}

/// Employee-directory lookup used for role resolution. Implemented by
/// `EmployeeManager` in production and by fakes in tests.
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    async fn find_by_chat_id(&self, chat_id: &str) -> Result<Option<EmployeeRecord>>;
}

/// Maps a Telegram identity to a role: a configured admin identity wins
/// unconditionally; otherwise the employee record's stored role is used.
/// Any miss or lookup failure degrades to the lowest-privilege interactive
/// role, `employee`.
pub struct RoleResolver {
    admin_id: Option<String>,
    directory: Arc<dyn EmployeeLookup>,
}

impl RoleResolver {
    pub fn new(admin_id: Option<String>, directory: Arc<dyn EmployeeLookup>) -> Self {
        Self {
            admin_id,
            directory,
        }
    }

    pub async fn resolve(&self, identity: &str) -> Role {
        if self.admin_id.as_deref() == Some(identity) {
            return Role::Admin;
        }

        match self.directory.find_by_chat_id(identity).await {
            Ok(Some(record)) => Role::parse(&record.role).unwrap_or_else(|| {
                warn!(
                    "employee {} carries unknown role {:?}, using employee",
                    identity, record.role
                );
                Role::Employee
            }),
            Ok(None) => Role::Employee,
            Err(err) => {
                warn!("role lookup failed for {}: {}", identity, err);
                Role::Employee
            }
        }
    }
}
