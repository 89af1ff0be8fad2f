use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::customers::{CustomerEntity, CustomerWithUserEntity};
use crate::domain::error::AppError;
use crate::domain::value_objects::customers::InsertCustomerModel;

#[automock]
#[async_trait]
pub trait CustomerRepository {
    async fn create(
        &self,
        insert_customer_model: InsertCustomerModel,
    ) -> Result<CustomerEntity, AppError>;

    /// The lookup key matches either the remote provider id or the owning
    /// user's id.
    async fn find_by_id(&self, id: String) -> Result<Option<CustomerWithUserEntity>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
