use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::queued_messages;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = queued_messages)]
pub struct QueuedMessageEntity {
    pub id: Uuid,
    pub topic: String,
    pub payload: Value,
    pub status: String,
    pub locked_at: Option<DateTime<Utc>>,
    pub locked_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = queued_messages)]
pub struct InsertQueuedMessageEntity {
    pub topic: String,
    pub payload: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
