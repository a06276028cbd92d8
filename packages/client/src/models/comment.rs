use serde::Serialize;
use uuid::Uuid;

use crate::entity::{profile, recipe_comment};
use crate::error::Error;

/// Comment row joined with its author's display fields.
#[derive(Clone, Debug, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Absent when the author profile row is gone.
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}

impl CommentView {
    pub(crate) fn from_parts(c: recipe_comment::Model, author: Option<&profile::Model>) -> Self {
        Self {
            id: c.id,
            recipe_id: c.recipe_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
            author_name: author.map(|p| p.full_name.clone()),
            author_avatar: author.and_then(|p| p.avatar_url.clone()),
        }
    }
}

/// Trims the submitted text; an empty result is a validation error,
/// never an empty insert.
pub fn validate_comment(content: &str) -> Result<&str, Error> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Comment must not be empty".into()));
    }
    Ok(trimmed)
}
