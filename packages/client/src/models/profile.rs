use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::profile;
use crate::error::Error;

/// Profile augmented with the derived follower-graph numbers.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Recipes authored by this profile.
    pub recipes: u64,
    /// Edges where this profile is followed.
    pub followers: u64,
    /// Edges where this profile follows someone.
    pub following: u64,
    /// True iff the viewer follows this profile.
    pub is_following: bool,
}

/// Compact profile used for comment authors and the recipe detail header.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileCard {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl From<profile::Model> for ProfileCard {
    fn from(p: profile::Model) -> Self {
        Self {
            id: p.id,
            username: p.username,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
        }
    }
}

/// Entry in a followers/following list.
#[derive(Clone, Debug, Serialize)]
pub struct FollowEntry {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub is_following: bool,
}

/// Owner-submitted partial profile update.
///
/// `None` leaves a field unchanged; for nullable fields, `Some(None)`
/// clears the value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), Error> {
    if let Some(ref username) = update.username {
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
    }
    if let Some(ref full_name) = update.full_name {
        if full_name.trim().is_empty() {
            return Err(Error::Validation("Name must not be empty".into()));
        }
    }
    Ok(())
}
