use async_trait::async_trait;
use chrono::Utc;
use diesel::insert_into;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::payment_links::{InsertPaymentLinkEntity, PaymentLinkEntity};
use crate::domain::error::AppError;
use crate::domain::repositories::payment_links::PaymentLinkRepository;
use crate::domain::value_objects::payment_links::InsertPaymentLinkModel;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::payment_links};

pub struct PaymentLinkPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentLinkPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentLinkRepository for PaymentLinkPostgres {
    async fn create(
        &self,
        insert_payment_link_model: InsertPaymentLinkModel,
    ) -> Result<PaymentLinkEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("create", err))?;

        let now = Utc::now();
        let insert_entity = InsertPaymentLinkEntity {
            stripe_paymentlink_id: insert_payment_link_model.stripe_paymentlink_id,
            currency: insert_payment_link_model
                .currency
                .unwrap_or_else(|| "BRL".to_string()),
            amount: insert_payment_link_model.amount,
            recurring_interval: insert_payment_link_model.recurring_interval.to_string(),
            post_id: insert_payment_link_model.post_id,
            created_at: now,
            updated_at: now,
        };

        let payment_link = insert_into(payment_links::table)
            .values(&insert_entity)
            .returning(PaymentLinkEntity::as_select())
            .get_result::<PaymentLinkEntity>(&mut conn)
            .map_err(|err| AppError::storage("create", err))?;

        Ok(payment_link)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentLinkEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        let payment_link = payment_links::table
            .find(id)
            .select(PaymentLinkEntity::as_select())
            .first::<PaymentLinkEntity>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        Ok(payment_link)
    }
}
