pub mod report_store;
pub use report_store::ReportStore;
pub mod reports_repo;
pub use reports_repo::ReportsRepository;
mod rows;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::Config;

/// Cria a pool explicitamente; quem chama é dono dela (e de fechá-la).
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .idle_timeout(config.db_idle_timeout)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "✅ Conexão com o banco de dados estabelecida com sucesso!"
    );
    Ok(pool)
}
