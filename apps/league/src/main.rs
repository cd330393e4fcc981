use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use saturday_league::api;
use saturday_league::config::AppConfig;
use saturday_league::domain::repositories::{MatchRepository, TeamRepository};
use saturday_league::infrastructure::repositories::{
    InMemoryMatchRepository, InMemoryTeamRepository, PostgresMatchRepository,
    PostgresTeamRepository,
};
use saturday_league::ledger::Ledger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let (teams, matches): (Arc<dyn TeamRepository>, Arc<dyn MatchRepository>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(database_url)
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database connected successfully");

                let teams: Arc<dyn TeamRepository> =
                    Arc::new(PostgresTeamRepository::new(pool.clone()));
                let matches: Arc<dyn MatchRepository> =
                    Arc::new(PostgresMatchRepository::new(pool));
                (teams, matches)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, standings will not survive a restart");
                let teams: Arc<dyn TeamRepository> = Arc::new(InMemoryTeamRepository::new());
                let matches: Arc<dyn MatchRepository> = Arc::new(InMemoryMatchRepository::new());
                (teams, matches)
            }
        };

    let ledger = Arc::new(Ledger::load(teams, matches).await?);
    let app = api::router(ledger);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
