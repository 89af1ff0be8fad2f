use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;

use crate::application::usecases::users::CreateUserUseCase;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::users::RegisterUserModel;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::users::UserPostgres,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(db_pool);
    let create_user_usecase = CreateUserUseCase::new(Arc::new(user_repository));

    Router::new()
        .route("/", post(create_user))
        .with_state(Arc::new(create_user_usecase))
}

pub async fn create_user<U>(
    State(create_user_usecase): State<Arc<CreateUserUseCase<U>>>,
    Json(register_user_model): Json<RegisterUserModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
{
    match create_user_usecase.execute(register_user_model).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}
