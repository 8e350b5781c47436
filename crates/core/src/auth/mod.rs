//! Roles and permission checks.
//!
//! Identity is established upstream; this module only decides what a
//! resolved role may do inside one owner's books.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// User roles within an owner's books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including payment deletion and audits.
    Owner,
    /// Can record entries and payments.
    Accountant,
    /// Read-only access.
    Viewer,
}

/// Actions guarded by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read ledger entries.
    ViewLedger,
    /// Create ledger entries.
    CreateEntries,
    /// Record AR/AP payments.
    RecordPayments,
    /// Delete recorded payments.
    DeletePayments,
    /// Run the integrity audit.
    RunIntegrityAudit,
}

impl Permission {
    /// Short action name used in error messages.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::ViewLedger => "view ledger",
            Self::CreateEntries => "create entries",
            Self::RecordPayments => "record payments",
            Self::DeletePayments => "delete payments",
            Self::RunIntegrityAudit => "run integrity audit",
        }
    }
}

impl UserRole {
    /// Returns true if this role holds `permission`.
    #[must_use]
    pub const fn can(self, permission: Permission) -> bool {
        match permission {
            Permission::ViewLedger => true,
            Permission::CreateEntries | Permission::RecordPayments => {
                matches!(self, Self::Owner | Self::Accountant)
            }
            Permission::DeletePayments | Permission::RunIntegrityAudit => {
                matches!(self, Self::Owner)
            }
        }
    }

    /// Fails with `PermissionDenied` unless this role holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PermissionDenied` when the role lacks it.
    pub fn authorize(self, permission: Permission) -> Result<(), LedgerError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(LedgerError::PermissionDenied {
                role: self.to_string(),
                action: permission.action(),
            })
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Accountant => write!(f, "accountant"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "accountant" => Ok(Self::Accountant),
            "viewer" => Ok(Self::Viewer),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
