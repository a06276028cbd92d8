use std::collections::HashMap;

use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{profile, recipe_comment};
use crate::error::Error;
use crate::models::comment::{CommentView, validate_comment};
use crate::realtime::CommentSubscription;
use crate::state::AppState;

/// Append a comment. The trimmed text is stored; the created row is
/// pushed to live subscribers of the recipe after the insert succeeds.
#[instrument(skip(state, content))]
pub async fn add_comment(
    state: &AppState,
    recipe_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<recipe_comment::Model, Error> {
    let content = validate_comment(content)?;

    let row = recipe_comment::ActiveModel {
        id: Set(Uuid::new_v4()),
        recipe_id: Set(recipe_id),
        user_id: Set(user_id),
        content: Set(content.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    let model = row.insert(&state.db).await?;

    state.comments.publish(&model);

    Ok(model)
}

/// Comments on a recipe, newest first, with author display fields joined
/// via one batched profile lookup.
#[instrument(skip(state))]
pub async fn list_comments(state: &AppState, recipe_id: Uuid) -> Result<Vec<CommentView>, Error> {
    let comments = recipe_comment::Entity::find()
        .filter(recipe_comment::Column::RecipeId.eq(recipe_id))
        .order_by_desc(recipe_comment::Column::CreatedAt)
        .all(&state.db)
        .await?;

    attach_authors(&state.db, comments).await
}

/// Open a live feed of comments appended to one recipe. Dropping the
/// subscription unsubscribes; keeping it across navigation leaks a
/// channel and double-delivers on remount.
pub fn subscribe_comments(state: &AppState, recipe_id: Uuid) -> CommentSubscription {
    state.comments.subscribe(recipe_id)
}

pub(crate) async fn attach_authors(
    db: &DatabaseConnection,
    comments: Vec<recipe_comment::Model>,
) -> Result<Vec<CommentView>, Error> {
    if comments.is_empty() {
        return Ok(Vec::new());
    }

    let mut user_ids: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let authors: HashMap<Uuid, profile::Model> = profile::Entity::find()
        .filter(profile::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(comments
        .into_iter()
        .map(|c| {
            let author = authors.get(&c.user_id);
            CommentView::from_parts(c, author)
        })
        .collect())
}
