use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::api::stats::annotate_recipes;
use crate::entity::recipe;
use crate::error::Error;
use crate::models::recipe::RecipeSummary;
use crate::state::AppState;

/// The all-recipes feed, newest first, annotated with counts and the
/// viewer's like/save flags. Without a viewer every flag is false.
#[instrument(skip(state), fields(viewer = ?viewer))]
pub async fn list_all_recipes(
    state: &AppState,
    viewer: Option<Uuid>,
) -> Result<Vec<RecipeSummary>, Error> {
    let recipes = recipe::Entity::find()
        .order_by_desc(recipe::Column::CreatedAt)
        .all(&state.db)
        .await?;

    annotate_recipes(&state.db, recipes, viewer).await
}
