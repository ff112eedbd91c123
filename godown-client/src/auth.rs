//! Role-based authorization gate
//!
//! Advisory, client-side only: the backend enforces its own checks. The
//! gate exists so the UI neither renders controls nor dispatches requests
//! the server will reject. Consulted uniformly by every mutation entry
//! point instead of re-deriving role comparisons at call sites.

use shared::models::Role;

use crate::error::{ClientError, ClientResult};

/// Mutating action subject to role gating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditProduct,
    DeleteProduct,
    ManageUsers,
    ManageCatalog,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Action::EditProduct => "edit products",
            Action::DeleteProduct => "delete products",
            Action::ManageUsers => "manage users",
            Action::ManageCatalog => "manage catalog entries",
        }
    }
}

/// Pure policy table: admins may do everything, managers everything except
/// user management, employees read only.
pub fn can_perform(role: Role, action: Action) -> bool {
    match (role, action) {
        (Role::Admin, _) => true,
        (Role::Manager, Action::ManageUsers) => false,
        (Role::Manager, _) => true,
        (Role::Employee, _) => false,
    }
}

/// Gate check for mutation entry points. A denial surfaces a user-facing
/// explanation and must result in no network call.
pub fn ensure_can(role: Role, action: Action) -> ClientResult<()> {
    if can_perform(role, action) {
        Ok(())
    } else {
        Err(ClientError::Forbidden(format!(
            "role '{}' may not {}",
            role,
            action.describe()
        )))
    }
}
