use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Follow edge. Row presence is the only state; the composite key keeps
/// the edge unique per (follower, following) pair.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub follower_id: Uuid,
    #[sea_orm(primary_key)]
    pub following_id: Uuid,
    #[sea_orm(belongs_to, from = "follower_id", to = "id", relation_enum = "Follower")]
    pub follower: HasOne<super::profile::Entity>,
    #[sea_orm(belongs_to, from = "following_id", to = "id", relation_enum = "Following")]
    pub following: HasOne<super::profile::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
