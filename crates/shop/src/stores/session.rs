//! Authentication session store.
//!
//! Owns the current identity and the persisted token that survives
//! restarts. Session restore is a recoverable-silent path: any failure
//! (missing token, stale token, network error) lands the store in the
//! unauthenticated state without surfacing an error to the user. Login
//! and signup failures are returned to the caller for inline display.

use std::io;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, warn};

use career_closet_core::{Email, EmailError, UserId};

use crate::api::{ApiClient, ApiError};
use crate::models::{StoredAuth, UserProfile};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors surfaced by login and signup.
///
/// Validation variants are produced before any network call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Signup passwords do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Backend rejected the credentials.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Network or backend failure.
    #[error("auth request failed: {0}")]
    Api(#[from] ApiError),

    /// The auth token could not be persisted.
    #[error("failed to persist auth token: {0}")]
    TokenStore(#[from] io::Error),
}

/// File-backed persistence for the auth token record.
///
/// A single JSON document at a well-known path; written on login, removed
/// on logout or failed restore.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Create a token cache at the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted token, if a valid one exists.
    ///
    /// A missing or malformed file reads as "no token"; the caller treats
    /// that the same as never having logged in.
    #[must_use]
    pub fn load(&self) -> Option<StoredAuth> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(auth) => Some(auth),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding malformed auth token");
                None
            }
        }
    }

    /// Persist a token record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, auth: &StoredAuth) -> io::Result<()> {
        let json = serde_json::to_string_pretty(auth).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }

    /// Erase the persisted token. Missing file is fine.
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "failed to remove auth token");
        }
    }
}

/// The authentication session: current user plus persisted token.
pub struct SessionStore {
    api: ApiClient,
    tokens: TokenCache,
    user: Option<UserProfile>,
}

impl SessionStore {
    /// Create an unauthenticated session store.
    #[must_use]
    pub const fn new(api: ApiClient, tokens: TokenCache) -> Self {
        Self {
            api,
            tokens,
            user: None,
        }
    }

    /// Whether a user is currently logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in user's profile, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The logged-in user's ID, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.user_id)
    }

    #[cfg(test)]
    pub(crate) fn set_user_for_tests(&mut self, user_id: &str) {
        self.user = Some(UserProfile {
            user_id: UserId::new(user_id),
            user_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            avatar: None,
            phone: None,
            address: None,
            settings: None,
        });
    }

    /// Restore the session from the persisted token.
    ///
    /// Fetches the user record with the token as bearer credential. Any
    /// failure clears the token and leaves the session unauthenticated;
    /// this never surfaces as a user-facing error.
    pub async fn restore(&mut self) {
        let Some(auth) = self.tokens.load() else {
            debug!("no persisted auth token");
            self.user = None;
            return;
        };

        match self.api.get_user(&auth.user_id).await {
            Ok(profile) => {
                debug!(user_id = %profile.user_id, "session restored");
                self.user = Some(profile);
            }
            Err(e) => {
                warn!(error = %e, "failed to restore session, clearing token");
                self.tokens.clear();
                self.user = None;
            }
        }
    }

    /// Log in with email and password.
    ///
    /// On success the identity token is persisted and the session becomes
    /// authenticated. On failure the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` before any network call if the
    /// email is malformed, `AuthError::InvalidCredentials` when the
    /// backend rejects the pair, or `AuthError::Api` on transport failure.
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<(), AuthError> {
        let email = Email::parse(email)?;

        let response = self.api.check_password(email.as_str(), password).await?;

        if !response.valid {
            return Err(AuthError::InvalidCredentials(
                response
                    .message
                    .unwrap_or_else(|| "Invalid login credentials".to_string()),
            ));
        }

        let Some(user_id) = response.user_id else {
            return Err(AuthError::InvalidCredentials(
                "login response carried no user id".to_string(),
            ));
        };

        let user_name = response.user_name.unwrap_or_default();
        let auth = StoredAuth {
            email: email.as_str().to_owned(),
            user_id: user_id.clone(),
            user_name: user_name.clone(),
            avatar: response.avatar.clone(),
        };
        self.tokens.save(&auth)?;

        self.user = Some(UserProfile {
            user_id,
            user_name,
            email: response.email.unwrap_or_else(|| email.into_inner()),
            avatar: response.avatar,
            phone: None,
            address: None,
            settings: None,
        });

        debug!(user_id = %auth.user_id, "logged in");
        Ok(())
    }

    /// Register a new account. Does not authenticate.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns a validation error (mismatched or short password, malformed
    /// email) before any network call, or the backend's rejection after.
    pub async fn sign_up(
        &self,
        user_name: &str,
        email: &str,
        password: &SecretString,
        confirm_password: &SecretString,
    ) -> Result<String, AuthError> {
        use secrecy::ExposeSecret;

        if password.expose_secret() != confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }
        if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }
        let email = Email::parse(email)?;

        let response = self
            .api
            .sign_up(user_name, email.as_str(), password, confirm_password)
            .await?;

        Ok(response
            .message
            .unwrap_or_else(|| "Account created successfully".to_string()))
    }

    /// Log out: erase the persisted token and drop the identity.
    ///
    /// The cart is user-scoped; the application root clears the cart
    /// manager alongside this call.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.user = None;
        debug!("logged out");
    }
}
