//! Account service
//!
//! Registration, login and secret changes against the credential store.

use tracing::{info, warn};

use crate::config::settings::DEFAULT_MIN_CREDENTIAL_LENGTH;
use crate::crypto::{verify_stored, SecretHasher};
use crate::error::{AuthError, JournalError, JournalResult};
use crate::models::{validate_secret, Credential, Username};
use crate::storage::Storage;

/// Proof that a username passed authentication
///
/// Only this module hands these out; the mood journal accepts nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: Username,
}

impl AuthenticatedUser {
    pub(crate) fn new(username: Username) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
    hasher: &'a dyn SecretHasher,
    min_length: usize,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage, hasher: &'a dyn SecretHasher) -> Self {
        Self {
            storage,
            hasher,
            min_length: DEFAULT_MIN_CREDENTIAL_LENGTH,
        }
    }

    /// Override the minimum username/secret length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Register a new user and create their empty mood log
    pub fn register(&self, username: &str, secret: &str) -> JournalResult<()> {
        let username = Username::new(username);
        check_not_blank(username.as_str(), secret)?;
        username.validate(self.min_length)?;
        validate_secret(secret, self.min_length)?;

        let _lock = self.storage.credentials.lock()?;
        // Another process may have registered since startup
        self.storage.credentials.load()?;

        if self.storage.credentials.contains(&username)? {
            return Err(JournalError::UsernameTaken(username.to_string()));
        }

        let credential = Credential::new(username.clone(), self.hasher.hash(secret)?);
        self.storage.credentials.upsert(credential)?;

        if let Err(e) = self.storage.credentials.save() {
            self.storage.credentials.remove(&username)?;
            return Err(e);
        }

        // The log is also created lazily on first submission
        if let Err(e) = self.storage.moods.create_empty(&username) {
            warn!(user = %username, error = %e, "could not create mood log at registration");
        }

        info!(user = %username, "registered user");
        Ok(())
    }

    /// Check a username/secret pair
    ///
    /// A secret stored in an older format is re-hashed with the configured
    /// hasher once it has been verified. Failing to do so does not fail the
    /// login.
    pub fn authenticate(&self, username: &str, secret: &str) -> JournalResult<AuthenticatedUser> {
        let credential = self.check_credentials(username, secret)?;

        if self.hasher.needs_rehash(secret, &credential.secret_hash) {
            if let Err(e) = self.upgrade_secret(&credential, secret) {
                warn!(user = %credential.username, error = %e, "could not upgrade stored secret");
            }
        }

        Ok(AuthenticatedUser::new(credential.username))
    }

    /// Verify against the in-memory store without taking the file lock
    fn check_credentials(&self, username: &str, secret: &str) -> JournalResult<Credential> {
        check_not_blank(username, secret)?;
        let username = Username::new(username);

        let credential = match self.storage.credentials.get(&username)? {
            Some(credential) => credential,
            None => {
                warn!(user = %username, "login for unknown user");
                return Err(AuthError::NotFound(username.to_string()).into());
            }
        };

        if !verify_stored(secret, &credential.secret_hash)? {
            warn!(user = %username, "login with wrong secret");
            return Err(AuthError::WrongSecret.into());
        }

        Ok(credential)
    }

    /// Replace a verified legacy value with the configured hash
    fn upgrade_secret(&self, verified: &Credential, secret: &str) -> JournalResult<()> {
        let _lock = self.storage.credentials.lock()?;
        self.storage.credentials.load()?;

        // Changed by another process since it was verified
        match self.storage.credentials.get(&verified.username)? {
            Some(current) if current == *verified => {}
            _ => return Ok(()),
        }

        let upgraded = Credential::new(verified.username.clone(), self.hasher.hash(secret)?);
        self.storage.credentials.upsert(upgraded)?;

        if let Err(e) = self.storage.credentials.save() {
            self.storage.credentials.upsert(verified.clone())?;
            return Err(e);
        }

        info!(user = %verified.username, "upgraded stored secret");
        Ok(())
    }

    /// Replace a user's secret after checking the current one
    pub fn change_secret(
        &self,
        username: &str,
        current: &str,
        new_secret: &str,
    ) -> JournalResult<()> {
        validate_secret(new_secret, self.min_length)?;

        let _lock = self.storage.credentials.lock()?;
        self.storage.credentials.load()?;

        let before = self.check_credentials(username, current)?;

        let updated = Credential::new(before.username.clone(), self.hasher.hash(new_secret)?);
        self.storage.credentials.upsert(updated)?;

        if let Err(e) = self.storage.credentials.save() {
            self.storage.credentials.upsert(before)?;
            return Err(e);
        }

        info!(user = %username, "changed secret");
        Ok(())
    }
}

fn check_not_blank(username: &str, secret: &str) -> JournalResult<()> {
    if username.is_empty() || secret.is_empty() {
        return Err(JournalError::Validation("Fields cannot be blank.".into()));
    }
    Ok(())
}
