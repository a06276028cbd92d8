use sea_orm::*;
use tracing::instrument;

use crate::api::stats::annotate_recipes;
use crate::entity::{category, recipe};
use crate::error::Error;
use crate::models::recipe::RecipeSummary;
use crate::state::AppState;

/// List every category, ordered by title ascending.
#[instrument(skip(state))]
pub async fn list_categories(state: &AppState) -> Result<Vec<category::Model>, Error> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Title)
        .all(&state.db)
        .await?;
    Ok(categories)
}

/// List the recipes in one category, each annotated with derived
/// like/save/comment counts.
///
/// An unknown slug is NotFound; a known category with no recipes is an
/// empty list.
#[instrument(skip(state), fields(slug))]
pub async fn list_recipes_by_category(
    state: &AppState,
    slug: &str,
) -> Result<Vec<RecipeSummary>, Error> {
    let cat = category::Entity::find()
        .filter(category::Column::Slug.eq(slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".into()))?;

    let recipes = recipe::Entity::find()
        .filter(recipe::Column::CategoryId.eq(cat.id))
        .all(&state.db)
        .await?;

    annotate_recipes(&state.db, recipes, None).await
}
