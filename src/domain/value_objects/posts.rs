use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::posts::{InsertPostEntity, PostEntity};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostModel {
    pub title: String,
    pub content: Option<String>,
    pub author_id: Uuid,
}

impl CreatePostModel {
    pub fn to_entity(&self) -> InsertPostEntity {
        let now = Utc::now();
        InsertPostEntity {
            title: self.title.clone(),
            content: self.content.clone(),
            views: 0,
            author_id: self.author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Feed result: the shuffled post list plus the published-post count.
#[derive(Debug, Clone)]
pub struct FeedDto {
    pub posts: Vec<PostEntity>,
    pub number_posts: i64,
}
