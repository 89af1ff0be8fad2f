use async_trait::async_trait;
use chrono::Utc;
use diesel::insert_into;
use diesel::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::application::interfaces::messaging::MessageQueue;
use crate::domain::entities::queued_messages::{InsertQueuedMessageEntity, QueuedMessageEntity};
use crate::domain::error::AppError;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::queued_messages};

pub const WEBHOOKS_STRIPE_TOPIC: &str = "webhooks-stripe";

/// Single-topic queue over the `queued_messages` table.
pub struct QueuedMessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl QueuedMessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MessageQueue for QueuedMessagePostgres {
    async fn publish(&self, payload: Value) -> Result<(), AppError> {
        let mut conn = self.db_pool.get().map_err(|err| {
            error!("Error on publish, {}", err);
            AppError::QueuePublish
        })?;

        let insert_entity = InsertQueuedMessageEntity {
            topic: WEBHOOKS_STRIPE_TOPIC.to_string(),
            payload,
            status: "queued".to_string(),
            created_at: Utc::now(),
        };

        insert_into(queued_messages::table)
            .values(&insert_entity)
            .execute(&mut conn)
            .map_err(|err| {
                error!("Error on publish, {}", err);
                AppError::QueuePublish
            })?;

        Ok(())
    }

    async fn receive_next(&self) -> Result<Option<QueuedMessageEntity>, AppError> {
        let mut conn = self.db_pool.get().map_err(|err| {
            error!("Error on receive_next, {}", err);
            AppError::QueueConsume
        })?;

        let worker_id = Uuid::new_v4().to_string();
        let current_time = Utc::now();

        // Transaction so a crashed consumer's row lock is released by postgres.
        let message = conn
            .transaction::<Option<QueuedMessageEntity>, diesel::result::Error, _>(|tx| {
                let candidate: Option<QueuedMessageEntity> = queued_messages::table
                    .select(QueuedMessageEntity::as_select())
                    .filter(queued_messages::topic.eq(WEBHOOKS_STRIPE_TOPIC))
                    .filter(queued_messages::status.eq("queued"))
                    .order(queued_messages::created_at.asc())
                    .for_update()
                    .skip_locked()
                    .first::<QueuedMessageEntity>(tx)
                    .optional()?;

                if let Some(message) = candidate {
                    let updated = diesel::update(queued_messages::table.find(message.id))
                        .set((
                            queued_messages::status.eq("running"),
                            queued_messages::locked_at.eq(Some(current_time)),
                            queued_messages::locked_by.eq(Some(worker_id)),
                        ))
                        .returning(QueuedMessageEntity::as_select())
                        .get_result::<QueuedMessageEntity>(tx)?;
                    Ok(Some(updated))
                } else {
                    Ok(None)
                }
            })
            .map_err(|err| {
                error!("Error on receive_next, {}", err);
                AppError::QueueConsume
            })?;

        Ok(message)
    }

    async fn mark_done(&self, message_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.db_pool.get().map_err(|err| {
            error!("Error on mark_done, {}", err);
            AppError::QueueConsume
        })?;

        diesel::update(queued_messages::table.find(message_id))
            .set((
                queued_messages::status.eq("done"),
                queued_messages::locked_at.eq::<Option<chrono::DateTime<Utc>>>(None),
                queued_messages::locked_by.eq::<Option<String>>(None),
            ))
            .execute(&mut conn)
            .map_err(|err| {
                error!("Error on mark_done, {}", err);
                AppError::QueueConsume
            })?;

        Ok(())
    }
}
