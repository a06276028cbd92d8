use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Authenticated principal as held by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Bearer token presented to the hosted store on subsequent calls.
    pub token: String,
}

pub fn validate_sign_up(email: &str, username: &str, password: &str) -> Result<(), Error> {
    validate_email(email)?;

    let username = username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err(Error::Validation("Username must be 1-32 characters".into()));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(Error::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }
    if password.len() < 8 || password.len() > 128 {
        return Err(Error::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), Error> {
    if email.trim().is_empty() {
        return Err(Error::Validation("Email must not be empty".into()));
    }
    if password.is_empty() {
        return Err(Error::Validation("Password must not be empty".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), Error> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.') && !email.contains(' ')
        }
        None => false,
    };
    if !valid {
        return Err(Error::Validation("Email address is not valid".into()));
    }
    Ok(())
}
