use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::customers;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = customers)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub email: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub stripe_customer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub struct InsertCustomerEntity {
    pub email: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub stripe_customer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer row joined with its owning user. The customer keeps its own
/// id and timestamps; the user contributes only the display name.
#[derive(Debug, Clone)]
pub struct CustomerWithUserEntity {
    pub id: Uuid,
    pub email: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub stripe_customer_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
