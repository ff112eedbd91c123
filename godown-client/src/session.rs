//! Session store and token persistence
//!
//! One opaque credential token, persisted as JSON in a caller-supplied
//! directory. The token file and the in-memory identity are kept in step:
//! the token is persisted before the identity is exposed on login, and
//! cleared before the identity is dropped on logout, so the two never
//! disagree outside the resolution window.

use serde::{Deserialize, Serialize};
use shared::client::{LoginRequest, UserInfo};
use shared::models::Role;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::StockApi;
use crate::error::ClientResult;

const TOKEN_FILE: &str = "token.json";

/// Persisted token shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Token storage backed by a single JSON file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a token store rooted at the given directory
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into().join(TOKEN_FILE);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Persist the token
    pub fn save(&self, token: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        let stored = StoredToken {
            token: token.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json)
    }

    /// Load the persisted token, if any
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&json).ok()?;
        Some(stored.token)
    }

    /// Check whether a token is persisted
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the persisted token
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Current authenticated identity plus the resolution flag
///
/// Created empty at process start, resolved once against the stored token,
/// then updated only by explicit login/logout or server-side invalidation.
#[derive(Debug)]
pub struct SessionStore {
    store: TokenStore,
    user: Option<UserInfo>,
    is_resolving: bool,
}

impl SessionStore {
    pub fn new(store: TokenStore) -> Self {
        Self {
            store,
            user: None,
            is_resolving: true,
        }
    }

    /// Restore the session from the persisted token, if possible.
    ///
    /// A rejected or unreachable profile check discards the token. Always
    /// ends with `is_resolving = false`; callers never block on a stuck
    /// resolution.
    pub async fn resolve<A: StockApi + ?Sized>(&mut self, api: &mut A) {
        if let Some(token) = self.store.load() {
            api.set_token(Some(token));
            match api.profile().await {
                Ok(user) => {
                    info!(username = %user.username, role = %user.role, "session restored");
                    self.user = Some(user);
                }
                Err(err) => {
                    warn!(error = %err, "stored token rejected, clearing session");
                    if let Err(err) = self.store.delete() {
                        warn!(error = %err, "could not delete stored token");
                    }
                    api.set_token(None);
                    self.user = None;
                }
            }
        }
        self.is_resolving = false;
    }

    /// Authenticate against the backend.
    ///
    /// On success the token is persisted and installed before the identity
    /// is set. On failure any previous session is left untouched.
    pub async fn login<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        username: &str,
        password: &str,
    ) -> ClientResult<UserInfo> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = api.login(&request).await?;

        self.store.save(&response.token)?;
        api.set_token(Some(response.token));
        info!(username = %response.user.username, "login successful");
        self.user = Some(response.user.clone());
        self.is_resolving = false;
        Ok(response.user)
    }

    /// Clear the session. Local clear is unconditional and never fails.
    pub fn logout<A: StockApi + ?Sized>(&mut self, api: &mut A) {
        if let Err(err) = self.store.delete() {
            warn!(error = %err, "could not delete stored token");
        }
        api.set_token(None);
        self.user = None;
        info!("logged out");
    }

    /// The 401 path: the server no longer accepts the token.
    pub fn invalidate<A: StockApi + ?Sized>(&mut self, api: &mut A) {
        warn!("session invalidated by server, forcing logout");
        self.logout(api);
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_resolving(&self) -> bool {
        self.is_resolving
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}
