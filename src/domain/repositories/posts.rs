use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::posts::{FeedEntity, InsertPostEntity, PostEntity};
use crate::domain::error::AppError;

#[automock]
#[async_trait]
pub trait PostRepository {
    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity, AppError>;
    async fn feed(&self) -> Result<FeedEntity, AppError>;
    async fn find_one(&self, id: Uuid) -> Result<Option<PostEntity>, AppError>;
}
