use std::collections::HashMap;

use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::api::comment::attach_authors;
use crate::entity::{category, profile, recipe, recipe_comment, recipe_like, recipe_save};
use crate::error::Error;
use crate::models::recipe::{RecipeDetail, RecipeDraft, validate_recipe_draft};
use crate::state::AppState;

/// Fetch one recipe with its author profile, newest-first comment list,
/// and like/save counts. A missing id is NotFound, distinct from a
/// transport failure, so the caller can render a "not found" page.
#[instrument(skip(state))]
pub async fn get_recipe(state: &AppState, id: Uuid) -> Result<RecipeDetail, Error> {
    let model = recipe::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Recipe not found".into()))?;

    let comments = recipe_comment::Entity::find()
        .filter(recipe_comment::Column::RecipeId.eq(id))
        .order_by_desc(recipe_comment::Column::CreatedAt)
        .all(&state.db);
    let author = profile::Entity::find_by_id(model.author_id).one(&state.db);
    let likes = recipe_like::Entity::find()
        .filter(recipe_like::Column::RecipeId.eq(id))
        .count(&state.db);
    let saves = recipe_save::Entity::find()
        .filter(recipe_save::Column::RecipeId.eq(id))
        .count(&state.db);

    let (comments, author, likes, saves) = tokio::try_join!(comments, author, likes, saves)?;
    let comments = attach_authors(&state.db, comments).await?;

    let instructions = model.steps();
    Ok(RecipeDetail {
        id: model.id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        prep_time: model.prep_time,
        cook_time: model.cook_time,
        servings: model.servings,
        difficulty: model.difficulty,
        instructions,
        author_id: model.author_id,
        category_id: model.category_id,
        created_at: model.created_at,
        author: author.map(Into::into),
        likes,
        saves,
        comments,
    })
}

/// Validate a draft and insert the recipe. All numeric draft fields are
/// text and must parse before anything reaches the store.
#[instrument(skip(state, draft), fields(title = %draft.title))]
pub async fn create_recipe(
    state: &AppState,
    draft: &RecipeDraft,
    author_id: Uuid,
) -> Result<recipe::Model, Error> {
    let valid = validate_recipe_draft(draft)?;

    category::Entity::find_by_id(valid.category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".into()))?;

    let row = recipe::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(valid.title),
        description: Set(valid.description),
        image_url: Set(valid.image_url),
        prep_time: Set(valid.prep_time),
        cook_time: Set(valid.cook_time),
        servings: Set(valid.servings),
        difficulty: Set(valid.difficulty.as_str().to_string()),
        instructions: Set(serde_json::to_value(&valid.instructions)
            .map_err(|e| Error::Store(format!("Instruction encoding failed: {e}")))?),
        author_id: Set(author_id),
        category_id: Set(valid.category_id),
        created_at: Set(chrono::Utc::now()),
    };

    let model = row.insert(&state.db).await?;
    Ok(model)
}

/// Recipes authored by a user.
#[instrument(skip(state))]
pub async fn user_recipes(state: &AppState, user_id: Uuid) -> Result<Vec<recipe::Model>, Error> {
    let recipes = recipe::Entity::find()
        .filter(recipe::Column::AuthorId.eq(user_id))
        .order_by_desc(recipe::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(recipes)
}

/// Recipes a user saved, most recently saved first.
#[instrument(skip(state))]
pub async fn saved_recipes(state: &AppState, user_id: Uuid) -> Result<Vec<recipe::Model>, Error> {
    let edges = recipe_save::Entity::find()
        .filter(recipe_save::Column::UserId.eq(user_id))
        .order_by_desc(recipe_save::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let ids: Vec<Uuid> = edges.iter().map(|e| e.recipe_id).collect();
    recipes_in_edge_order(&state.db, ids).await
}

/// Recipes a user liked, most recently liked first.
#[instrument(skip(state))]
pub async fn liked_recipes(state: &AppState, user_id: Uuid) -> Result<Vec<recipe::Model>, Error> {
    let edges = recipe_like::Entity::find()
        .filter(recipe_like::Column::UserId.eq(user_id))
        .order_by_desc(recipe_like::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let ids: Vec<Uuid> = edges.iter().map(|e| e.recipe_id).collect();
    recipes_in_edge_order(&state.db, ids).await
}

/// Fetch recipe rows for an id list and return them in the list's order.
async fn recipes_in_edge_order(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<recipe::Model>, Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<Uuid, recipe::Model> = recipe::Entity::find()
        .filter(recipe::Column::Id.is_in(ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    Ok(ids.into_iter().filter_map(|id| by_id.remove(&id)).collect())
}
