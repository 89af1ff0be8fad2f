use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::info;

use crate::application::interfaces::{messaging::MessageQueue, payments::PaymentGateway};
use crate::application::usecases::payment_events::ReceivePaymentEventUseCase;
use crate::infrastructure::messaging::queue::QueuedMessagePostgres;
use crate::infrastructure::payments::stripe_client::StripeClient;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;

pub fn routes(db_pool: Arc<PgPoolSquad>, stripe_client: Arc<StripeClient>) -> Router {
    let receive_payment_event_usecase = ReceivePaymentEventUseCase::new(
        stripe_client,
        Arc::new(QueuedMessagePostgres::new(db_pool)),
    );

    Router::new()
        .route("/webhook", get(receive_payment_events))
        .with_state(Arc::new(receive_payment_event_usecase))
}

pub async fn receive_payment_events<G, Q>(
    State(receive_payment_event_usecase): State<Arc<ReceivePaymentEventUseCase<G, Q>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    G: PaymentGateway + 'static,
    Q: MessageQueue + 'static,
{
    // Signature comes from the raw header map; an absent header simply
    // fails verification downstream.
    let signature = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    info!(payload_bytes = body.len(), "payment_webhook: event received");

    match receive_payment_event_usecase
        .execute(&body, signature)
        .await
    {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}
