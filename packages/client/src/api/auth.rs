use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{account, profile};
use crate::error::Error;
use crate::models::auth::{Principal, validate_sign_in, validate_sign_up};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Register a new account with its implicit profile, sign a bearer
/// token, and publish the principal to the session holder.
#[instrument(skip(state, password), fields(email = %email, username = %username))]
pub async fn sign_up(
    state: &AppState,
    email: &str,
    username: &str,
    password: &str,
) -> Result<Principal, Error> {
    validate_sign_up(email, username, password)?;

    let email = email.trim().to_lowercase();
    let username = username.trim().to_string();

    let password_hash = hash::hash_password(password)
        .map_err(|e| Error::Store(format!("Password hash error: {e}")))?;

    let id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let txn = state.db.begin().await?;

    let new_account = account::ActiveModel {
        id: Set(id),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        created_at: Set(now),
    };
    new_account.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Sign-up race: unique email constraint caught on insert");
            Error::EmailTaken
        }
        _ => Error::from(e),
    })?;

    let new_profile = profile::ActiveModel {
        id: Set(id),
        username: Set(username.clone()),
        full_name: Set(username.clone()),
        avatar_url: Set(None),
        bio: Set(None),
        website: Set(None),
        location: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    new_profile.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Sign-up race: unique username constraint caught on insert");
            Error::UsernameTaken
        }
        _ => Error::from(e),
    })?;

    txn.commit().await?;

    let principal = issue_principal(state, id, &email, &username)?;
    state.session.set(Some(principal.clone()));
    Ok(principal)
}

/// Sign in with email and password. Unknown email and wrong password are
/// indistinguishable to the caller.
#[instrument(skip(state, password), fields(email = %email))]
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> Result<Principal, Error> {
    validate_sign_in(email, password)?;

    let email = email.trim().to_lowercase();

    let acct = account::Entity::find()
        .filter(account::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    let is_valid = hash::verify_password(password, &acct.password_hash)
        .map_err(|e| Error::Store(format!("Password verify error: {e}")))?;
    if !is_valid {
        return Err(Error::InvalidCredentials);
    }

    let prof = profile::Entity::find_by_id(acct.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;

    let principal = issue_principal(state, acct.id, &acct.email, &prof.username)?;
    state.session.set(Some(principal.clone()));
    Ok(principal)
}

/// Clear the session holder. Subscribers observe the transition to None.
#[instrument(skip(state))]
pub async fn sign_out(state: &AppState) {
    state.session.set(None);
}

/// The currently signed-in principal, if any.
pub fn current_user(state: &AppState) -> Option<Principal> {
    state.session.current()
}

fn issue_principal(
    state: &AppState,
    id: Uuid,
    email: &str,
    username: &str,
) -> Result<Principal, Error> {
    let token = jwt::sign(id, email, &state.config.auth.jwt_secret)
        .map_err(|e| Error::Store(format!("JWT sign error: {e}")))?;
    Ok(Principal {
        id,
        email: email.to_string(),
        username: username.to_string(),
        token,
    })
}
