use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::customers::InsertCustomerEntity;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerModel {
    pub user_id: Uuid,
    pub description: Option<String>,
}

/// What the create-customer flow hands to the repository once the remote
/// customer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCustomerModel {
    pub email: String,
    pub stripe_customer_id: String,
    pub user_id: Uuid,
    pub description: Option<String>,
}

impl InsertCustomerModel {
    pub fn to_entity(&self) -> InsertCustomerEntity {
        let now = Utc::now();
        InsertCustomerEntity {
            email: self.email.clone(),
            description: self.description.clone(),
            user_id: self.user_id,
            stripe_customer_id: self.stripe_customer_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCustomerDto {
    pub created_at_stripe: String,
    pub stripe_customer_id: String,
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetailsDto {
    pub id: Uuid,
    pub email: String,
    pub stripe_customer_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
