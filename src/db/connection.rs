use sqlx::{Error, Pool, Postgres, postgres::PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;

/// Create a PostgreSQL connection pool
///
/// Connection options (host, credentials, TLS, statement logging) come from
/// [`DatabaseConfig::connect_options`]; the pool size from
/// `max_connections`.
pub async fn get_connection(database: &DatabaseConfig) -> Result<Pool<Postgres>, Error> {
    let options = database.connect_options()?;
    info!(
        "Connecting to PostgreSQL at {}:{}/{} (pool size {})",
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or("<default>"),
        database.max_connections
    );

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect_with(options)
        .await
}
