use std::collections::HashMap;

use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{follow, profile, recipe};
use crate::error::Error;
use crate::models::profile::{FollowEntry, ProfileUpdate, ProfileView, validate_profile_update};
use crate::state::AppState;

/// Fetch a profile with its derived follower-graph numbers.
///
/// The recipe count and the three follower-graph reads have no ordering
/// dependency and are issued concurrently. Any failure fails the whole
/// read; there is no partial profile.
#[instrument(skip(state), fields(viewer = ?viewer))]
pub async fn fetch_profile(
    state: &AppState,
    user_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<ProfileView, Error> {
    let model = profile::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;

    let recipes = recipe::Entity::find()
        .filter(recipe::Column::AuthorId.eq(user_id))
        .count(&state.db);
    let followers = follow::Entity::find()
        .filter(follow::Column::FollowingId.eq(user_id))
        .count(&state.db);
    let following = follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .count(&state.db);
    let viewer_edge = async {
        match viewer {
            Some(v) => follow::Entity::find_by_id((v, user_id)).one(&state.db).await,
            None => Ok(None),
        }
    };

    let (recipes, followers, following, viewer_edge) =
        tokio::try_join!(recipes, followers, following, viewer_edge)?;

    Ok(ProfileView {
        id: model.id,
        username: model.username,
        full_name: model.full_name,
        avatar_url: model.avatar_url,
        bio: model.bio,
        website: model.website,
        location: model.location,
        created_at: model.created_at,
        recipes,
        followers,
        following,
        is_following: viewer_edge.is_some(),
    })
}

/// Profiles following a user. `is_following` is left false; the caller
/// resolves it against its own viewer when needed.
#[instrument(skip(state))]
pub async fn get_followers(state: &AppState, user_id: Uuid) -> Result<Vec<FollowEntry>, Error> {
    let edges = follow::Entity::find()
        .filter(follow::Column::FollowingId.eq(user_id))
        .all(&state.db)
        .await?;
    let ids: Vec<Uuid> = edges.into_iter().map(|e| e.follower_id).collect();
    follow_entries(&state.db, ids, false).await
}

/// Profiles a user follows. These are by definition followed, so every
/// entry carries `is_following = true`.
#[instrument(skip(state))]
pub async fn get_following(state: &AppState, user_id: Uuid) -> Result<Vec<FollowEntry>, Error> {
    let edges = follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .all(&state.db)
        .await?;
    let ids: Vec<Uuid> = edges.into_iter().map(|e| e.following_id).collect();
    follow_entries(&state.db, ids, true).await
}

/// Owner-only partial update. Only provided fields change; `updated_at`
/// is bumped on every successful write.
#[instrument(skip(state, update))]
pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<profile::Model, Error> {
    validate_profile_update(&update)?;

    let existing = profile::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;

    let mut active: profile::ActiveModel = existing.into();
    if let Some(username) = update.username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(full_name) = update.full_name {
        active.full_name = Set(full_name.trim().to_string());
    }
    if let Some(avatar_url) = update.avatar_url {
        active.avatar_url = Set(avatar_url);
    }
    if let Some(bio) = update.bio {
        active.bio = Set(bio);
    }
    if let Some(website) = update.website {
        active.website = Set(website);
    }
    if let Some(location) = update.location {
        active.location = Set(location);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::UsernameTaken,
        _ => Error::from(e),
    })?;

    Ok(model)
}

async fn follow_entries(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
    is_following: bool,
) -> Result<Vec<FollowEntry>, Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<Uuid, profile::Model> = profile::Entity::find()
        .filter(profile::Column::Id.is_in(ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(ids
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .map(|p| FollowEntry {
            id: p.id,
            username: p.username,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            is_following,
        })
        .collect())
}
