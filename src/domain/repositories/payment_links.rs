use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_links::PaymentLinkEntity;
use crate::domain::error::AppError;
use crate::domain::value_objects::payment_links::InsertPaymentLinkModel;

#[automock]
#[async_trait]
pub trait PaymentLinkRepository {
    async fn create(
        &self,
        insert_payment_link_model: InsertPaymentLinkModel,
    ) -> Result<PaymentLinkEntity, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentLinkEntity>, AppError>;
}
