use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::entity::category;

/// Default categories seeded on startup: (slug, title, description).
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("italian", "Italian", "Pasta, pizza, and everything in between"),
    ("japanese", "Japanese", "Sushi, ramen, and home-style washoku"),
    ("mexican", "Mexican", "Tacos, salsas, and street-food classics"),
    ("indian", "Indian", "Curries, breads, and spice-forward cooking"),
    (
        "mediterranean",
        "Mediterranean",
        "Fresh vegetables, olive oil, and grilled fish",
    ),
    ("chinese", "Chinese", "Stir-fries, dumplings, and regional staples"),
];

/// Seed the `categories` table with defaults. Existing slugs are left
/// untouched, so this is safe to run on every startup.
pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(slug, title, description) in DEFAULT_CATEGORIES {
        let exists = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        category::ActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(slug.to_string()),
            title: Set(title.to_string()),
            description: Set(Some(description.to_string())),
            image_url: Set(None),
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {} default categories", inserted);
    }

    Ok(())
}
