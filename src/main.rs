use std::sync::Arc;

use booking_marketplace::{
    build_router,
    features::search::{executor::SearchExecutor, repository::PgListingStore},
    services::database::Database,
    utilities::{app_state::AppState, config::Config},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.as_str()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    let database = Database::init(&config).await?;
    if config.run_migrations {
        database.migrate().await?;
    }

    let store = Arc::new(PgListingStore::new(database.pool.clone()));
    let search = SearchExecutor::new(store, config.search_timeout());

    let state = AppState {
        database,
        config: config.clone(),
        search,
    };
    let router = build_router(state)?;

    let listener = TcpListener::bind(&config.server_address).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down");
        })
        .await?;

    Ok(())
}
