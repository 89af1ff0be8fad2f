use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_links;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_links)]
pub struct PaymentLinkEntity {
    pub id: Uuid,
    pub purchased_number: i32,
    pub stripe_paymentlink_id: String,
    pub currency: String,
    pub amount: i32,
    pub recurring_interval: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// `purchased_number` starts at the storage default of zero.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_links)]
pub struct InsertPaymentLinkEntity {
    pub stripe_paymentlink_id: String,
    pub currency: String,
    pub amount: i32,
    pub recurring_interval: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
