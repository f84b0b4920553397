//! Username / plaintext password authenticator.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::auth::{require_non_empty, Authenticator};
use crate::error::Result;

/// Accepts exactly the configured username and password.
pub struct PlaintextAuthenticator {
    username: String,
    password: String,
}

impl PlaintextAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = require_non_empty("username", username.into())?;
        let password = require_non_empty("password", password.into())?;
        Ok(Self { username, password })
    }
}

impl Authenticator for PlaintextAuthenticator {
    fn check_credentials(&self, username: Option<&str>, password: Option<&str>) -> bool {
        let (Some(username), Some(password)) = (username, password) else {
            return false;
        };
        let username_ok = username == self.username;
        let password_ok = password.len() == self.password.len()
            && bool::from(password.as_bytes().ct_eq(self.password.as_bytes()));
        username_ok && password_ok
    }
}

impl fmt::Debug for PlaintextAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaintextAuthenticator")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
