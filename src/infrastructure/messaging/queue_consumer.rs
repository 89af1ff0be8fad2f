use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

use crate::application::interfaces::messaging::MessageQueue;
use crate::domain::error::AppError;

pub async fn run_consumer_loop<Q>(queue: Arc<Q>) -> Result<()>
where
    Q: MessageQueue + 'static,
{
    loop {
        if let Err(e) = drain_queued_messages(queue.as_ref()).await {
            error!("Error while draining queued payment events: {}", e);
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

async fn drain_queued_messages<Q>(queue: &Q) -> Result<(), AppError>
where
    Q: MessageQueue,
{
    while let Some(message) = queue.receive_next().await? {
        info!("Received message from : {}", message.payload);
        queue.mark_done(message.id).await?;
    }

    Ok(())
}
