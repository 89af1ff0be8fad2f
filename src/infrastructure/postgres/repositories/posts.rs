use async_trait::async_trait;
use diesel::insert_into;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::posts::{FeedEntity, InsertPostEntity, PostEntity};
use crate::domain::error::AppError;
use crate::domain::repositories::posts::PostRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::posts};

pub struct PostPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PostPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PostRepository for PostPostgres {
    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("create", err))?;

        let post = insert_into(posts::table)
            .values(&insert_post_entity)
            .returning(PostEntity::as_select())
            .get_result::<PostEntity>(&mut conn)
            .map_err(|err| AppError::storage("create", err))?;

        Ok(post)
    }

    async fn feed(&self) -> Result<FeedEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("feed", err))?;

        let published_posts = posts::table
            .filter(posts::published.eq(true))
            .select(PostEntity::as_select())
            .load::<PostEntity>(&mut conn)
            .map_err(|err| AppError::storage("feed", err))?;

        let number_posts = posts::table
            .filter(posts::published.eq(true))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| AppError::storage("feed", err))?;

        Ok(FeedEntity {
            posts: published_posts,
            number_posts,
        })
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<PostEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("find_one", err))?;

        let post = posts::table
            .find(id)
            .select(PostEntity::as_select())
            .first::<PostEntity>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("find_one", err))?;

        Ok(post)
    }
}
