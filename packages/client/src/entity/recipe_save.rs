use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Save edge. Carries optional meal-planning fields alongside the pair.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_saves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub recipe_id: Uuid,
    #[sea_orm(primary_key)]
    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: HasOne<super::recipe::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::profile::Entity>,

    /// Day the user planned the recipe for, if any.
    pub scheduled_date: Option<Date>,
    pub custom_name: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
