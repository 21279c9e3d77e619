use crate::{
    error::{ApiError, AppResult},
    models::{item, Item, ItemModel, SoftDelete},
    response::PaginationParams,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

pub struct ItemService {
    db: DatabaseConnection,
}

impl ItemService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live (not soft-deleted) items ordered by id, with the total count.
    pub async fn list(&self, params: PaginationParams) -> AppResult<(Vec<ItemModel>, u64)> {
        let live = Item::find().filter(item::Column::DeletedAt.is_null());

        let total = live.clone().count(&self.db).await?;
        let items = live
            .order_by_asc(item::Column::Id)
            .limit(params.limit)
            .offset(params.offset)
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    pub async fn get(&self, id: i32) -> AppResult<ItemModel> {
        Item::find_by_id(id)
            .one(&self.db)
            .await?
            .filter(|item| !item.is_deleted())
            .ok_or_else(|| ApiError::not_found(format!("Item {id} not found")))
    }

    pub async fn create(&self, name: &str) -> AppResult<ItemModel> {
        let new_item = item::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            ..Default::default()
        };

        let item = new_item.insert(&self.db).await?;
        tracing::debug!("Created item {}", item.id);
        Ok(item)
    }

    /// Marks the item deleted. The lookup and the update share a transaction
    /// that is rolled back if either step fails.
    pub async fn soft_delete(&self, id: i32) -> AppResult<ItemModel> {
        let txn = self.db.begin().await?;

        let existing = Item::find_by_id(id)
            .one(&txn)
            .await?
            .filter(|item| !item.is_deleted())
            .ok_or_else(|| ApiError::not_found(format!("Item {id} not found")))?;

        let mut active: item::ActiveModel = existing.into();
        active.mark_deleted(chrono::Utc::now());
        let deleted = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!("Soft-deleted item {}", id);
        Ok(deleted)
    }
}
