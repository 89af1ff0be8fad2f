use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::recurring_intervals::RecurringInterval;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLinkModel {
    pub post_id: Uuid,
    pub currency: Option<String>,
    pub amount: i32,
    #[serde(default)]
    pub recurring_interval: RecurringInterval,
}

/// What the create-payment-link flow hands to the repository once the remote
/// price and link exist. Storage defaults (currency) are applied on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPaymentLinkModel {
    pub amount: i32,
    pub currency: Option<String>,
    pub post_id: Uuid,
    pub recurring_interval: RecurringInterval,
    pub stripe_paymentlink_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLinkUrlDto {
    pub url: String,
}
