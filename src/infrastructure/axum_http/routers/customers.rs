use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::interfaces::payments::PaymentGateway;
use crate::application::usecases::customers::{CreateCustomerUseCase, FindOneCustomerUseCase};
use crate::domain::repositories::{customers::CustomerRepository, users::UserRepository};
use crate::domain::value_objects::customers::CreateCustomerModel;
use crate::infrastructure::payments::stripe_client::StripeClient;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{customers::CustomerPostgres, users::UserPostgres},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, stripe_client: Arc<StripeClient>) -> Router {
    let create_customer_usecase = CreateCustomerUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(CustomerPostgres::new(Arc::clone(&db_pool))),
        Arc::clone(&stripe_client),
    );
    let find_one_customer_usecase = FindOneCustomerUseCase::new(
        Arc::new(CustomerPostgres::new(Arc::clone(&db_pool))),
        stripe_client,
    );

    Router::new()
        .route("/", post(create_customer))
        .with_state(Arc::new(create_customer_usecase))
        .merge(
            Router::new()
                .route("/:id", get(find_one_customer))
                .with_state(Arc::new(find_one_customer_usecase)),
        )
}

pub async fn create_customer<U, C, G>(
    State(create_customer_usecase): State<Arc<CreateCustomerUseCase<U, C, G>>>,
    Json(create_customer_model): Json<CreateCustomerModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    match create_customer_usecase.execute(create_customer_model).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn find_one_customer<C, G>(
    State(find_one_customer_usecase): State<Arc<FindOneCustomerUseCase<C, G>>>,
    Path(id): Path<String>,
) -> Response
where
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    match find_one_customer_usecase.execute(id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}
