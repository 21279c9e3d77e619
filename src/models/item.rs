use crate::models::base::{stamp_timestamps, SoftDelete, Timestamped};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        stamp_timestamps(&mut self.created_at, &mut self.updated_at, insert, Utc::now());
        Ok(self)
    }
}

impl ActiveModel {
    pub fn mark_deleted(&mut self, at: DateTimeUtc) {
        self.deleted_at = ActiveValue::Set(Some(at));
    }
}

impl Timestamped for Model {
    fn created_at(&self) -> DateTimeUtc {
        self.created_at
    }

    fn updated_at(&self) -> DateTimeUtc {
        self.updated_at
    }
}

impl SoftDelete for Model {
    fn deleted_at(&self) -> Option<DateTimeUtc> {
        self.deleted_at
    }
}
