//! Credential check for the single configured account
//!
//! Plaintext comparison against one username/password pair. Nothing is
//! issued on success; the check is stateless.

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Deliberately does not say which field was wrong
    #[error("Invalid credentials")]
    Unauthorized,
}

#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        // Both comparisons always run
        let user_ok = username == self.username;
        let pass_ok = password == self.password;
        if user_ok & pass_ok {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
