use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::AppError;
use crate::infrastructure::payments::stripe_client::{
    CreatePriceModel, StripeCustomer, StripeEvent, StripePaymentLink, StripePrice,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_customer(&self, name: String, email: String)
    -> Result<StripeCustomer, AppError>;

    async fn find_customer_by_email(&self, email: String) -> Result<StripeCustomer, AppError>;

    async fn create_price(&self, price: CreatePriceModel) -> Result<StripePrice, AppError>;

    async fn create_payment_link(
        &self,
        price_id: String,
        quantity: i32,
        post_id: Uuid,
    ) -> Result<StripePaymentLink, AppError>;

    fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<StripeEvent, AppError>;
}
