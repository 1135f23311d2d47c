//! Connection setup. One pool is opened per run and shared, sequentially,
//! across all files in the batch.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::error::DbError;

/// Resolved connection parameters; credential loading happens at the CLI
/// edge, never here.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Target schema name. Statements are schema-qualified rather than
    /// relying on a default database, so the pool connects without one.
    pub database: String,
}

/// Open the run's connection pool. Execution is sequential, so a single
/// connection is enough.
pub async fn connect(params: &ConnectParams) -> Result<MySqlPool, DbError> {
    let options = MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .password(&params.password);
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}
