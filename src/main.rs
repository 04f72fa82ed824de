use player_web_api::{config::Config, db, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting player api server...");

    let config = Config::from_env()?;

    // Create database connection pool
    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::init_schema(&pool).await?;

    tracing::info!("Database connection established.");

    let addr = config.addr();
    let app = routes::app(pool);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
