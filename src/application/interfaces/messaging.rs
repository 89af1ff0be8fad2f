use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::queued_messages::QueuedMessageEntity;
use crate::domain::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn publish(&self, payload: Value) -> Result<(), AppError>;
    async fn receive_next(&self) -> Result<Option<QueuedMessageEntity>, AppError>;
    async fn mark_done(&self, message_id: Uuid) -> Result<(), AppError>;
}
