//! Error types for tracker-backed operations.
//!
//! The router catches all of these at route boundaries and renders a
//! generic failure screen; nothing propagates to the Telegram transport.

use thiserror::Error;

use crate::roles::Role;

/// Failures from the tracker client, the domain managers, or the router's
/// central permission gate.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Network-level failure talking to the tracker, including timeouts.
    #[error("tracker transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("tracker responded {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A lookup matched no record.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The caller's role rank is below what the action requires.
    #[error("role {role} may not perform {action}")]
    PermissionDenied { role: Role, action: String },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
