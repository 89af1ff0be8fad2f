pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use infrastructure::axum_http::http_serve;
use infrastructure::messaging::{queue::QueuedMessagePostgres, queue_consumer};
use infrastructure::postgres::postgres_connection;

pub async fn run() -> Result<()> {
    observability::init_observability()?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let db_pool = Arc::new(postgres_pool);

    let queue = Arc::new(QueuedMessagePostgres::new(Arc::clone(&db_pool)));
    let consumer = tokio::spawn(queue_consumer::run_consumer_loop(queue));

    let server = tokio::spawn(http_serve::start(Arc::new(dotenvy_env), db_pool));

    tokio::select! {
        result = consumer => result??,
        result = server => result??,
    };

    Ok(())
}
