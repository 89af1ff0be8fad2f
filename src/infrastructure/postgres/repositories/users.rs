use async_trait::async_trait;
use diesel::prelude::*;
use diesel::{delete, insert_into, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::posts::PostEntity;
use crate::domain::entities::users::{
    EditUserEntity, InsertUserEntity, UserEntity, UserWithPostsEntity,
};
use crate::domain::error::AppError;
use crate::domain::repositories::users::UserRepository;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{posts, users},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn create(&self, register_user_entity: InsertUserEntity) -> Result<UserEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("create", err))?;

        let user = insert_into(users::table)
            .values(&register_user_entity)
            .returning(UserEntity::as_select())
            .get_result::<UserEntity>(&mut conn)
            .map_err(|err| AppError::storage("create", err))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        let user = users::table
            .find(id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        Ok(user)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("find_by_email", err))?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("find_by_email", err))?;

        Ok(user)
    }

    async fn update(
        &self,
        id: Uuid,
        edit_user_entity: EditUserEntity,
    ) -> Result<UserEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("update", err))?;

        let user = update(users::table.find(id))
            .set(&edit_user_entity)
            .returning(UserEntity::as_select())
            .get_result::<UserEntity>(&mut conn)
            .map_err(|err| AppError::storage("update", err))?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("delete", err))?;

        delete(users::table.find(id))
            .execute(&mut conn)
            .map_err(|err| AppError::storage("delete", err))?;

        Ok(())
    }

    async fn delete_many(&self, id: Uuid) -> Result<(), AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("delete_many", err))?;

        delete(users::table.filter(users::id.eq(id)))
            .execute(&mut conn)
            .map_err(|err| AppError::storage("delete_many", err))?;

        Ok(())
    }

    async fn list_posts(&self, id: Uuid) -> Result<Option<UserWithPostsEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("list_posts", err))?;

        let user = users::table
            .find(id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("list_posts", err))?;

        let Some(user) = user else {
            return Ok(None);
        };

        let user_posts = posts::table
            .filter(posts::author_id.eq(id))
            .select(PostEntity::as_select())
            .load::<PostEntity>(&mut conn)
            .map_err(|err| AppError::storage("list_posts", err))?;

        Ok(Some(UserWithPostsEntity {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            posts: user_posts,
        }))
    }
}
