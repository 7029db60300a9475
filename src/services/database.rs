use std::str::FromStr;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::{debug, info};

use crate::utilities::{config::Config, errors::AppError};

#[derive(Clone, Debug)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn init(config: &Config) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(&config.database_url)?.ssl_mode(config.pg_ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_with(options)
            .await?;

        info!("connected to postgres");

        Ok(Self { pool })
    }

    /// Builds a pool that only connects when first used.
    pub fn lazy(config: &Config) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(&config.database_url)?.ssl_mode(config.pg_ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        debug!("running migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
