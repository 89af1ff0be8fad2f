use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::{EditUserEntity, InsertUserEntity, UserEntity, UserWithPostsEntity};
use crate::domain::error::AppError;

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn create(&self, register_user_entity: InsertUserEntity) -> Result<UserEntity, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, AppError>;
    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>, AppError>;
    async fn update(&self, id: Uuid, edit_user_entity: EditUserEntity)
    -> Result<UserEntity, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
    async fn delete_many(&self, id: Uuid) -> Result<(), AppError>;
    async fn list_posts(&self, id: Uuid) -> Result<Option<UserWithPostsEntity>, AppError>;
}
