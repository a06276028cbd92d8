use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single numbered instruction step.
/// Stored as a JSON array in the database; `number` is 1-based and dense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: i32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Minutes, >= 0.
    pub prep_time: i32,
    /// Minutes, >= 0.
    pub cook_time: i32,
    /// >= 1.
    pub servings: i32,
    /// One of: Easy, Medium, Hard
    pub difficulty: String,

    /// Instruction steps stored as a JSON array of
    /// {number, instruction, tip?} objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub instructions: serde_json::Value,

    pub author_id: Uuid,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: HasOne<super::profile::Entity>,

    pub category_id: Uuid,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    #[sea_orm(has_many)]
    pub likes: HasMany<super::recipe_like::Entity>,

    #[sea_orm(has_many)]
    pub saves: HasMany<super::recipe_save::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::recipe_comment::Entity>,

    pub created_at: DateTimeUtc,
}

impl Model {
    /// Decode the JSON instruction column. Rows written through this
    /// client always decode; anything malformed degrades to no steps.
    pub fn steps(&self) -> Vec<InstructionStep> {
        serde_json::from_value(self.instructions.clone()).unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
