use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::posts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Serialize)]
#[diesel(table_name = posts)]
#[serde(rename_all = "camelCase")]
pub struct PostEntity {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub views: i32,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// `published` is left to the storage default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct InsertPostEntity {
    pub title: String,
    pub content: Option<String>,
    pub views: i32,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Published posts together with their count, as loaded by the feed query.
#[derive(Debug, Clone)]
pub struct FeedEntity {
    pub posts: Vec<PostEntity>,
    pub number_posts: i64,
}
