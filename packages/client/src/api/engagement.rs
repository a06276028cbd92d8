use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{follow, recipe_like, recipe_save};
use crate::error::Error;
use crate::state::AppState;

/// Optional meal-planning fields carried on a save edge.
#[derive(Clone, Debug, Default)]
pub struct SaveOptions {
    pub scheduled_date: Option<chrono::NaiveDate>,
    pub custom_name: Option<String>,
}

/// Toggle the viewer's like on a recipe. Returns the resulting state:
/// true when the edge now exists.
#[instrument(skip(state))]
pub async fn toggle_like(state: &AppState, recipe_id: Uuid, user_id: Uuid) -> Result<bool, Error> {
    let existing = recipe_like::Entity::find_by_id((recipe_id, user_id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        recipe_like::Entity::delete_by_id((recipe_id, user_id))
            .exec(&state.db)
            .await?;
        return Ok(false);
    }

    let row = recipe_like::ActiveModel {
        recipe_id: Set(recipe_id),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
    };
    insert_collapsing_duplicate(row.insert(&state.db).await)
}

/// Toggle the viewer's save on a recipe. `options` only applies when the
/// toggle creates the edge.
#[instrument(skip(state, options))]
pub async fn toggle_save(
    state: &AppState,
    recipe_id: Uuid,
    user_id: Uuid,
    options: SaveOptions,
) -> Result<bool, Error> {
    let existing = recipe_save::Entity::find_by_id((recipe_id, user_id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        recipe_save::Entity::delete_by_id((recipe_id, user_id))
            .exec(&state.db)
            .await?;
        return Ok(false);
    }

    let row = recipe_save::ActiveModel {
        recipe_id: Set(recipe_id),
        user_id: Set(user_id),
        scheduled_date: Set(options.scheduled_date),
        custom_name: Set(options.custom_name),
        created_at: Set(chrono::Utc::now()),
    };
    insert_collapsing_duplicate(row.insert(&state.db).await)
}

/// Toggle whether `follower_id` follows `following_id`. Self-follows are
/// rejected before any store call.
#[instrument(skip(state))]
pub async fn toggle_follow(
    state: &AppState,
    following_id: Uuid,
    follower_id: Uuid,
) -> Result<bool, Error> {
    if following_id == follower_id {
        return Err(Error::Validation("You cannot follow yourself".into()));
    }

    let existing = follow::Entity::find_by_id((follower_id, following_id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        follow::Entity::delete_by_id((follower_id, following_id))
            .exec(&state.db)
            .await?;
        return Ok(false);
    }

    let row = follow::ActiveModel {
        follower_id: Set(follower_id),
        following_id: Set(following_id),
        created_at: Set(chrono::Utc::now()),
    };
    insert_collapsing_duplicate(row.insert(&state.db).await)
}

/// Two rapid toggles can race between the existence read and the insert;
/// the store's uniqueness constraint rejects the loser. That duplicate is
/// "already in target state", not a failure the user should see.
fn insert_collapsing_duplicate<M>(result: Result<M, DbErr>) -> Result<bool, Error> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!("duplicate edge insert collapsed; already in target state");
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}
