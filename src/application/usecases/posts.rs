use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::domain::entities::posts::PostEntity;
use crate::domain::error::AppError;
use crate::domain::repositories::{posts::PostRepository, users::UserRepository};
use crate::domain::value_objects::posts::{CreatePostModel, FeedDto};

pub struct CreatePostUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    post_repo: Arc<P>,
}

impl<U, P> CreatePostUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, post_repo: Arc<P>) -> Self {
        Self { user_repo, post_repo }
    }

    pub async fn execute(&self, create_post_model: CreatePostModel) -> Result<PostEntity, AppError> {
        let author = self
            .user_repo
            .find_by_id(create_post_model.author_id)
            .await?;

        if author.is_none() {
            let err = AppError::AuthorNotFound;
            warn!(
                author_id = %create_post_model.author_id,
                status = err.status_code().as_u16(),
                "posts: author does not resolve"
            );
            return Err(err);
        }

        let post = self.post_repo.create(create_post_model.to_entity()).await?;
        info!(post_id = %post.id, author_id = %post.author_id, "posts: post created");

        Ok(post)
    }
}

pub struct FeedUseCase<P>
where
    P: PostRepository + Send + Sync + 'static,
{
    post_repo: Arc<P>,
}

impl<P> FeedUseCase<P>
where
    P: PostRepository + Send + Sync + 'static,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Returns the published posts in a fresh random order on every call;
    /// the shuffle is presentational only and never persisted.
    pub async fn execute(&self) -> Result<FeedDto, AppError> {
        let feed = self.post_repo.feed().await?;

        let mut posts = feed.posts;
        posts.shuffle(&mut rand::thread_rng());

        info!(number_posts = feed.number_posts, "posts: feed loaded");

        Ok(FeedDto {
            posts,
            number_posts: feed.number_posts,
        })
    }
}
