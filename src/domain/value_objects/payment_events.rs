use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment-intent lifecycle transitions relayed onto the queue. Any other
/// provider event type is rejected at the webhook boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentEventType {
    Created,
    PaymentFailed,
    Processing,
    Succeeded,
    RequiresAction,
}

impl PaymentEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentEventType::Created => "payment_intent.created",
            PaymentEventType::PaymentFailed => "payment_intent.payment_failed",
            PaymentEventType::Processing => "payment_intent.processing",
            PaymentEventType::Succeeded => "payment_intent.succeeded",
            PaymentEventType::RequiresAction => "payment_intent.requires_action",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "payment_intent.created" => Some(PaymentEventType::Created),
            "payment_intent.payment_failed" => Some(PaymentEventType::PaymentFailed),
            "payment_intent.processing" => Some(PaymentEventType::Processing),
            "payment_intent.succeeded" => Some(PaymentEventType::Succeeded),
            "payment_intent.requires_action" => Some(PaymentEventType::RequiresAction),
            _ => None,
        }
    }
}

impl Display for PaymentEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient view of a verified webhook event; consumed as a message
/// payload, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub events: PaymentEventType,
    pub metadata: PaymentEventMetadata,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEventMetadata {
    #[serde(rename = "postId")]
    pub post_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_five_lifecycle_types() {
        for raw in [
            "payment_intent.created",
            "payment_intent.payment_failed",
            "payment_intent.processing",
            "payment_intent.succeeded",
            "payment_intent.requires_action",
        ] {
            let parsed = PaymentEventType::from_str(raw).expect("lifecycle type should parse");
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn rejects_other_provider_events() {
        assert_eq!(PaymentEventType::from_str("charge.succeeded"), None);
        assert_eq!(PaymentEventType::from_str("checkout.session.completed"), None);
        assert_eq!(PaymentEventType::from_str(""), None);
    }
}
