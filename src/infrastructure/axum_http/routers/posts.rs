use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::interfaces::payments::PaymentGateway;
use crate::application::usecases::{
    payment_links::CreatePaymentLinkUseCase,
    posts::{CreatePostUseCase, FeedUseCase},
};
use crate::domain::repositories::{
    payment_links::PaymentLinkRepository, posts::PostRepository, users::UserRepository,
};
use crate::domain::value_objects::{
    payment_links::CreatePaymentLinkModel, posts::CreatePostModel,
};
use crate::infrastructure::payments::stripe_client::StripeClient;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        payment_links::PaymentLinkPostgres, posts::PostPostgres, users::UserPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, stripe_client: Arc<StripeClient>) -> Router {
    let create_post_usecase = CreatePostUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PostPostgres::new(Arc::clone(&db_pool))),
    );
    let feed_usecase = FeedUseCase::new(Arc::new(PostPostgres::new(Arc::clone(&db_pool))));
    let create_payment_link_usecase = CreatePaymentLinkUseCase::new(
        Arc::new(PostPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentLinkPostgres::new(Arc::clone(&db_pool))),
        stripe_client,
    );

    Router::new()
        .route("/", post(create_post))
        .with_state(Arc::new(create_post_usecase))
        .merge(
            Router::new()
                .route("/feed", get(feed))
                .with_state(Arc::new(feed_usecase)),
        )
        .merge(
            Router::new()
                .route("/payment", post(create_payment_link))
                .with_state(Arc::new(create_payment_link_usecase)),
        )
}

pub async fn create_post<U, P>(
    State(create_post_usecase): State<Arc<CreatePostUseCase<U, P>>>,
    Json(create_post_model): Json<CreatePostModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match create_post_usecase.execute(create_post_model).await {
        Ok(post) => (StatusCode::CREATED, Json(post)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn feed<P>(State(feed_usecase): State<Arc<FeedUseCase<P>>>) -> Response
where
    P: PostRepository + Send + Sync + 'static,
{
    match feed_usecase.execute().await {
        Ok(feed) => {
            let mut response = (StatusCode::OK, Json(feed.posts)).into_response();
            response
                .headers_mut()
                .insert("x-posts-numbers", HeaderValue::from(feed.number_posts));
            response
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_payment_link<P, L, G>(
    State(create_payment_link_usecase): State<Arc<CreatePaymentLinkUseCase<P, L, G>>>,
    Json(create_payment_link_model): Json<CreatePaymentLinkModel>,
) -> Response
where
    P: PostRepository + Send + Sync + 'static,
    L: PaymentLinkRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    match create_payment_link_usecase
        .execute(create_payment_link_model)
        .await
    {
        Ok(payment_link) => (StatusCode::CREATED, Json(payment_link)).into_response(),
        Err(err) => err.into_response(),
    }
}
