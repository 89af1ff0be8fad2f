use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::payments::PaymentGateway;
use crate::domain::error::AppError;
use crate::domain::repositories::{
    payment_links::PaymentLinkRepository, posts::PostRepository,
};
use crate::domain::value_objects::payment_links::{
    CreatePaymentLinkModel, InsertPaymentLinkModel, PaymentLinkUrlDto,
};
use crate::infrastructure::payments::stripe_client::CreatePriceModel;

pub struct CreatePaymentLinkUseCase<P, L, G>
where
    P: PostRepository + Send + Sync + 'static,
    L: PaymentLinkRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    post_repo: Arc<P>,
    payment_link_repo: Arc<L>,
    payment_gateway: Arc<G>,
}

impl<P, L, G> CreatePaymentLinkUseCase<P, L, G>
where
    P: PostRepository + Send + Sync + 'static,
    L: PaymentLinkRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(post_repo: Arc<P>, payment_link_repo: Arc<L>, payment_gateway: Arc<G>) -> Self {
        Self {
            post_repo,
            payment_link_repo,
            payment_gateway,
        }
    }

    pub async fn execute(
        &self,
        create_payment_link_model: CreatePaymentLinkModel,
    ) -> Result<PaymentLinkUrlDto, AppError> {
        let post = self
            .post_repo
            .find_one(create_payment_link_model.post_id)
            .await?
            .ok_or_else(|| {
                let err = AppError::PostNotFound;
                warn!(
                    post_id = %create_payment_link_model.post_id,
                    status = err.status_code().as_u16(),
                    "payment_links: post does not resolve"
                );
                err
            })?;

        let price = self
            .payment_gateway
            .create_price(CreatePriceModel {
                currency: create_payment_link_model.currency.clone(),
                unit_amount: create_payment_link_model.amount,
                interval: create_payment_link_model.recurring_interval,
                product_name: post.title.clone(),
                post_id: post.id,
            })
            .await?;

        let payment_link = self
            .payment_gateway
            .create_payment_link(
                price.id.clone(),
                create_payment_link_model.amount,
                post.id,
            )
            .await?;

        self.payment_link_repo
            .create(InsertPaymentLinkModel {
                amount: create_payment_link_model.amount,
                currency: create_payment_link_model.currency.clone(),
                post_id: post.id,
                recurring_interval: create_payment_link_model.recurring_interval,
                stripe_paymentlink_id: payment_link.id.clone(),
            })
            .await?;

        info!(
            post_id = %post.id,
            stripe_paymentlink_id = %payment_link.id,
            "payment_links: payment link created"
        );

        Ok(PaymentLinkUrlDto {
            url: payment_link.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interfaces::payments::MockPaymentGateway;
    use crate::domain::entities::payment_links::PaymentLinkEntity;
    use crate::domain::entities::posts::PostEntity;
    use crate::domain::repositories::payment_links::MockPaymentLinkRepository;
    use crate::domain::repositories::posts::MockPostRepository;
    use crate::domain::value_objects::enums::recurring_intervals::RecurringInterval;
    use crate::infrastructure::payments::stripe_client::{StripePaymentLink, StripePrice};
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn sample_post(id: Uuid) -> PostEntity {
        let now = Utc::now();
        PostEntity {
            id,
            title: "Premium post".to_string(),
            content: Some("body".to_string()),
            published: true,
            views: 7,
            author_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_link(post_id: Uuid) -> PaymentLinkEntity {
        let now = Utc::now();
        PaymentLinkEntity {
            id: Uuid::new_v4(),
            purchased_number: 0,
            stripe_paymentlink_id: "plink_1".to_string(),
            currency: "BRL".to_string(),
            amount: 2000,
            recurring_interval: "year".to_string(),
            post_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn persists_the_remote_link_and_returns_only_its_url() {
        let post_id = Uuid::new_v4();
        let post = sample_post(post_id);

        let mut post_repo = MockPostRepository::new();
        let found = post.clone();
        post_repo
            .expect_find_one()
            .with(eq(post_id))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_price()
            .with(eq(CreatePriceModel {
                currency: Some("BRL".to_string()),
                unit_amount: 2000,
                interval: RecurringInterval::Year,
                product_name: "Premium post".to_string(),
                post_id,
            }))
            .times(1)
            .returning(|_| {
                Ok(StripePrice {
                    id: "price_1".to_string(),
                })
            });
        payment_gateway
            .expect_create_payment_link()
            .with(eq("price_1".to_string()), eq(2000), eq(post_id))
            .times(1)
            .returning(|_, _, _| {
                Ok(StripePaymentLink {
                    id: "plink_1".to_string(),
                    url: "https://buy.stripe.com/test_plink_1".to_string(),
                })
            });

        let mut payment_link_repo = MockPaymentLinkRepository::new();
        payment_link_repo
            .expect_create()
            .with(eq(InsertPaymentLinkModel {
                amount: 2000,
                currency: Some("BRL".to_string()),
                post_id,
                recurring_interval: RecurringInterval::Year,
                stripe_paymentlink_id: "plink_1".to_string(),
            }))
            .times(1)
            .returning(move |_| Ok(stored_link(post_id)));

        let usecase = CreatePaymentLinkUseCase::new(
            Arc::new(post_repo),
            Arc::new(payment_link_repo),
            Arc::new(payment_gateway),
        );
        let result = usecase
            .execute(CreatePaymentLinkModel {
                post_id,
                currency: Some("BRL".to_string()),
                amount: 2000,
                recurring_interval: RecurringInterval::Year,
            })
            .await
            .expect("payment link creation should succeed");

        assert_eq!(
            result,
            PaymentLinkUrlDto {
                url: "https://buy.stripe.com/test_plink_1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn rejects_an_unknown_post_before_any_remote_call() {
        let post_id = Uuid::new_v4();
        let mut post_repo = MockPostRepository::new();
        post_repo
            .expect_find_one()
            .with(eq(post_id))
            .times(1)
            .returning(|_| Ok(None));

        // Neither gateway call nor local write may happen.
        let payment_gateway = MockPaymentGateway::new();
        let payment_link_repo = MockPaymentLinkRepository::new();

        let usecase = CreatePaymentLinkUseCase::new(
            Arc::new(post_repo),
            Arc::new(payment_link_repo),
            Arc::new(payment_gateway),
        );
        let err = usecase
            .execute(CreatePaymentLinkModel {
                post_id,
                currency: None,
                amount: 500,
                recurring_interval: RecurringInterval::Month,
            })
            .await
            .expect_err("missing post must be rejected");

        assert!(matches!(err, AppError::PostNotFound));
        assert_eq!(err.to_string(), "Post Does not exists");
        assert_eq!(err.status_code().as_u16(), 409);
    }

    #[tokio::test]
    async fn provider_rejections_keep_their_own_classification() {
        let post_id = Uuid::new_v4();
        let post = sample_post(post_id);

        let mut post_repo = MockPostRepository::new();
        post_repo
            .expect_find_one()
            .times(1)
            .returning(move |_| Ok(Some(post.clone())));

        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_price()
            .times(1)
            .returning(|_| {
                Err(AppError::PaymentProvider {
                    message: "Missing required param: currency.".to_string(),
                })
            });

        let payment_link_repo = MockPaymentLinkRepository::new();

        let usecase = CreatePaymentLinkUseCase::new(
            Arc::new(post_repo),
            Arc::new(payment_link_repo),
            Arc::new(payment_gateway),
        );
        let err = usecase
            .execute(CreatePaymentLinkModel {
                post_id,
                currency: None,
                amount: 500,
                recurring_interval: RecurringInterval::Year,
            })
            .await
            .expect_err("provider rejection must propagate");

        assert!(matches!(err, AppError::PaymentProvider { .. }));
        assert_eq!(err.status_code().as_u16(), 422);
    }
}
