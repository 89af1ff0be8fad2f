use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::{info, warn};

use crate::application::interfaces::{messaging::MessageQueue, payments::PaymentGateway};
use crate::domain::error::AppError;
use crate::domain::value_objects::payment_events::{
    PaymentEvent, PaymentEventMetadata, PaymentEventType,
};
use crate::infrastructure::payments::stripe_client::StripeEvent;

pub struct ReceivePaymentEventUseCase<G, Q>
where
    G: PaymentGateway + 'static,
    Q: MessageQueue + 'static,
{
    payment_gateway: Arc<G>,
    message_queue: Arc<Q>,
}

impl<G, Q> ReceivePaymentEventUseCase<G, Q>
where
    G: PaymentGateway + 'static,
    Q: MessageQueue + 'static,
{
    pub fn new(payment_gateway: Arc<G>, message_queue: Arc<Q>) -> Self {
        Self {
            payment_gateway,
            message_queue,
        }
    }

    pub async fn execute(&self, payload: &[u8], signature: &str) -> Result<(), AppError> {
        let event = self
            .payment_gateway
            .verify_webhook_signature(payload, signature)
            .map_err(|err| {
                warn!(error = %err, "payment_events: webhook verification failed");
                AppError::Webhook {
                    message: err.to_string(),
                }
            })?;

        let Some(event_type) = PaymentEventType::from_str(&event.type_) else {
            let err = AppError::Webhook {
                message: "NOT THE SAME EVENT TYPE".to_string(),
            };
            warn!(
                event_type = %event.type_,
                status = err.status_code().as_u16(),
                "payment_events: event type is not a payment-intent transition"
            );
            return Err(err);
        };

        let payment_event = Self::to_payment_event(event_type, &event);
        info!(
            event_type = %payment_event.events,
            post_id = ?payment_event.metadata.post_id,
            "payment_events: webhook verified"
        );

        let payload = serde_json::to_value(&event.data).map_err(|err| AppError::Webhook {
            message: err.to_string(),
        })?;

        self.message_queue.publish(payload).await.map_err(|err| {
            warn!(error = %err, "payment_events: publish failed");
            AppError::Webhook {
                message: err.to_string(),
            }
        })?;

        Ok(())
    }

    fn to_payment_event(event_type: PaymentEventType, event: &StripeEvent) -> PaymentEvent {
        let post_id = event.data.object["metadata"]["postId"]
            .as_str()
            .map(|value| value.to_string());
        let created_at = event
            .created
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        PaymentEvent {
            events: event_type,
            metadata: PaymentEventMetadata { post_id },
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interfaces::messaging::MockMessageQueue;
    use crate::application::interfaces::payments::MockPaymentGateway;
    use crate::infrastructure::payments::stripe_client::StripeEventData;
    use mockall::predicate::eq;

    fn verified_event(type_: &str) -> StripeEvent {
        StripeEvent {
            id: Some("evt_1".to_string()),
            type_: type_.to_string(),
            created: Some(1_700_000_000),
            livemode: Some(false),
            data: StripeEventData {
                object: serde_json::json!({
                    "id": "pi_1",
                    "metadata": { "postId": "7e1c1a52-2b8e-4c8f-9a41-3f54cc1f2a10" }
                }),
            },
        }
    }

    #[tokio::test]
    async fn publishes_the_event_data_exactly_once_for_an_allowed_type() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_verify_webhook_signature()
            .times(1)
            .returning(|_, _| Ok(verified_event("payment_intent.succeeded")));

        let expected_payload = serde_json::json!({
            "object": {
                "id": "pi_1",
                "metadata": { "postId": "7e1c1a52-2b8e-4c8f-9a41-3f54cc1f2a10" }
            }
        });

        let mut message_queue = MockMessageQueue::new();
        message_queue
            .expect_publish()
            .with(eq(expected_payload))
            .times(1)
            .returning(|_| Ok(()));

        let usecase =
            ReceivePaymentEventUseCase::new(Arc::new(payment_gateway), Arc::new(message_queue));
        usecase
            .execute(b"{}", "t=1,v1=abc")
            .await
            .expect("allowed event type should be relayed");
    }

    #[tokio::test]
    async fn rejects_an_unrecognized_type_without_publishing() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_verify_webhook_signature()
            .times(1)
            .returning(|_, _| Ok(verified_event("checkout.session.completed")));

        // No publish expectation.
        let message_queue = MockMessageQueue::new();

        let usecase =
            ReceivePaymentEventUseCase::new(Arc::new(payment_gateway), Arc::new(message_queue));
        let err = usecase
            .execute(b"{}", "t=1,v1=abc")
            .await
            .expect_err("foreign event type must be rejected");

        assert!(matches!(err, AppError::Webhook { .. }));
        assert_eq!(err.to_string(), "Webhook Error: NOT THE SAME EVENT TYPE");
        assert_eq!(err.status_code().as_u16(), 409);
    }

    #[tokio::test]
    async fn wraps_a_verification_failure_as_a_webhook_error() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_verify_webhook_signature()
            .times(1)
            .returning(|_, _| {
                Err(AppError::Internal(anyhow::anyhow!(
                    "invalid webhook signature"
                )))
            });

        let message_queue = MockMessageQueue::new();

        let usecase =
            ReceivePaymentEventUseCase::new(Arc::new(payment_gateway), Arc::new(message_queue));
        let err = usecase
            .execute(b"{}", "t=1,v1=tampered")
            .await
            .expect_err("verification failure must be rejected");

        assert_eq!(err.to_string(), "Webhook Error: invalid webhook signature");
        assert_eq!(err.status_code().as_u16(), 409);
    }

    #[tokio::test]
    async fn wraps_a_publish_failure_as_a_webhook_error() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_verify_webhook_signature()
            .times(1)
            .returning(|_, _| Ok(verified_event("payment_intent.created")));

        let mut message_queue = MockMessageQueue::new();
        message_queue
            .expect_publish()
            .times(1)
            .returning(|_| Err(AppError::QueuePublish));

        let usecase =
            ReceivePaymentEventUseCase::new(Arc::new(payment_gateway), Arc::new(message_queue));
        let err = usecase
            .execute(b"{}", "t=1,v1=abc")
            .await
            .expect_err("publish failure must surface");

        assert_eq!(
            err.to_string(),
            "Webhook Error: ERROR ON SENDING webhooks-stripe"
        );
        assert_eq!(err.status_code().as_u16(), 409);
    }
}
