//! Field groups shared by persisted entities.
//!
//! Entities declare the columns themselves (`created_at`, `updated_at`,
//! `deleted_at`) and opt into each group by implementing its trait; the
//! `before_save` hook of their `ActiveModelBehavior` calls
//! [`stamp_timestamps`].

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue;

pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

pub trait SoftDelete {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Timestamps plus soft delete: the shape every entity is expected to have.
pub trait BaseModel: Timestamped + SoftDelete {}

impl<T: Timestamped + SoftDelete> BaseModel for T {}

/// `created_at` is filled on insert unless set explicitly; `updated_at` is
/// refreshed on every save.
pub fn stamp_timestamps(
    created_at: &mut ActiveValue<DateTime<Utc>>,
    updated_at: &mut ActiveValue<DateTime<Utc>>,
    insert: bool,
    now: DateTime<Utc>,
) {
    if insert && !created_at.is_set() {
        *created_at = ActiveValue::Set(now);
    }
    *updated_at = ActiveValue::Set(now);
}

/// Table name for an entity type: the last path segment, lower-cased.
pub fn table_name_for(type_name: &str) -> String {
    type_name
        .rsplit("::")
        .next()
        .unwrap_or(type_name)
        .to_ascii_lowercase()
}
