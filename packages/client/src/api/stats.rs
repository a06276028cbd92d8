use std::collections::{HashMap, HashSet};

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{recipe, recipe_comment, recipe_like, recipe_save};
use crate::error::Error;
use crate::models::recipe::RecipeSummary;

/// Annotate recipe rows with derived engagement counts and per-viewer
/// flags.
///
/// Three batched edge queries over the listed id set, folded into
/// per-recipe buckets in memory. Counts are always row counts over the
/// edge tables; a recipe with no edge rows gets plain zeros.
pub(crate) async fn annotate_recipes(
    db: &DatabaseConnection,
    recipes: Vec<recipe::Model>,
    viewer: Option<Uuid>,
) -> Result<Vec<RecipeSummary>, Error> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();

    let likes = recipe_like::Entity::find()
        .filter(recipe_like::Column::RecipeId.is_in(ids.clone()))
        .select_only()
        .column(recipe_like::Column::RecipeId)
        .column(recipe_like::Column::UserId)
        .into_tuple::<(Uuid, Uuid)>()
        .all(db);
    let saves = recipe_save::Entity::find()
        .filter(recipe_save::Column::RecipeId.is_in(ids.clone()))
        .select_only()
        .column(recipe_save::Column::RecipeId)
        .column(recipe_save::Column::UserId)
        .into_tuple::<(Uuid, Uuid)>()
        .all(db);
    let comments = recipe_comment::Entity::find()
        .filter(recipe_comment::Column::RecipeId.is_in(ids))
        .select_only()
        .column(recipe_comment::Column::RecipeId)
        .into_tuple::<Uuid>()
        .all(db);

    let (likes, saves, comments) = tokio::try_join!(likes, saves, comments)?;

    Ok(fold_stats(recipes, &likes, &saves, &comments, viewer))
}

fn fold_stats(
    recipes: Vec<recipe::Model>,
    likes: &[(Uuid, Uuid)],
    saves: &[(Uuid, Uuid)],
    comments: &[Uuid],
    viewer: Option<Uuid>,
) -> Vec<RecipeSummary> {
    let (like_counts, liked) = fold_edges(likes, viewer);
    let (save_counts, saved) = fold_edges(saves, viewer);

    let mut comment_counts: HashMap<Uuid, u64> = HashMap::new();
    for recipe_id in comments {
        *comment_counts.entry(*recipe_id).or_default() += 1;
    }

    recipes
        .into_iter()
        .map(|m| {
            let mut summary = RecipeSummary::from_model(m);
            summary.likes = like_counts.get(&summary.id).copied().unwrap_or(0);
            summary.saves = save_counts.get(&summary.id).copied().unwrap_or(0);
            summary.comments = comment_counts.get(&summary.id).copied().unwrap_or(0);
            summary.is_liked = liked.contains(&summary.id);
            summary.is_saved = saved.contains(&summary.id);
            summary
        })
        .collect()
}

fn fold_edges(
    edges: &[(Uuid, Uuid)],
    viewer: Option<Uuid>,
) -> (HashMap<Uuid, u64>, HashSet<Uuid>) {
    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    let mut flagged: HashSet<Uuid> = HashSet::new();
    for &(recipe_id, user_id) in edges {
        *counts.entry(recipe_id).or_default() += 1;
        if Some(user_id) == viewer {
            flagged.insert(recipe_id);
        }
    }
    (counts, flagged)
}
