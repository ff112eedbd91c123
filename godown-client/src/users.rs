//! User administration
//!
//! Admin-only directory operations. Every entry point consults the
//! authorization gate before dispatching, and a 401 forces the session
//! out exactly like any other authenticated mutation.

use shared::client::RegisterRequest;
use shared::models::{UserAccount, UserUpdate};
use tracing::info;

use crate::api::StockApi;
use crate::auth::{Action, ensure_can};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

const USERNAME_MIN_LEN: usize = 3;
const PASSWORD_MIN_LEN: usize = 6;

/// Cached user directory
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<UserAccount>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    /// Fetch and replace the directory
    pub async fn load<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
    ) -> ClientResult<()> {
        Self::gate(session)?;
        match api.users().await {
            Ok(users) => {
                self.users = users;
                Ok(())
            }
            Err(err) => Err(Self::handle(api, session, err)),
        }
    }

    /// Create a user and append it to the directory
    pub async fn create<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        request: &RegisterRequest,
    ) -> ClientResult<i64> {
        Self::gate(session)?;
        validate_new_user(request)?;
        match api.register(request).await {
            Ok(created) => {
                info!(username = %created.username, role = %created.role, "user created");
                let id = created.id;
                self.users.push(created);
                Ok(id)
            }
            Err(err) => Err(Self::handle(api, session, err)),
        }
    }

    /// Apply a partial update and refresh the local entry
    pub async fn update<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        id: i64,
        update: &UserUpdate,
    ) -> ClientResult<()> {
        Self::gate(session)?;
        match api.update_user(id, update).await {
            Ok(updated) => {
                if let Some(entry) = self.users.iter_mut().find(|u| u.id == id) {
                    *entry = updated;
                }
                Ok(())
            }
            Err(err) => Err(Self::handle(api, session, err)),
        }
    }

    /// Delete a user and drop it from the directory
    pub async fn delete<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        id: i64,
    ) -> ClientResult<()> {
        Self::gate(session)?;
        match api.delete_user(id).await {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                Ok(())
            }
            Err(err) => Err(Self::handle(api, session, err)),
        }
    }

    fn gate(session: &SessionStore) -> ClientResult<()> {
        let role = session.role().ok_or(ClientError::Unauthorized)?;
        ensure_can(role, Action::ManageUsers)
    }

    fn handle<A: StockApi + ?Sized>(
        api: &mut A,
        session: &mut SessionStore,
        err: ClientError,
    ) -> ClientError {
        if err.is_auth_error() {
            session.invalidate(api);
        }
        err
    }
}

/// Local checks before the register call
fn validate_new_user(request: &RegisterRequest) -> ClientResult<()> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(ClientError::Validation("Username is required".to_string()));
    }
    if username.len() < USERNAME_MIN_LEN {
        return Err(ClientError::Validation(format!(
            "Username must be at least {} characters",
            USERNAME_MIN_LEN
        )));
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(ClientError::Validation("Email is required".to_string()));
    }
    if !is_plausible_email(email) {
        return Err(ClientError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    if request.password.is_empty() {
        return Err(ClientError::Validation("Password is required".to_string()));
    }
    if request.password.len() < PASSWORD_MIN_LEN {
        return Err(ClientError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }

    Ok(())
}

/// local-part "@" domain "." tld, no whitespace
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
