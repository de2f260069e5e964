use anyhow::Context;
use storage::{Database, services::seed::{self, SeedOutcome}};

mod config;
mod error;
mod features;
mod routes;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Workout Tracker API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::new(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    // Seeding failures are logged, not fatal
    match seed::seed_if_empty(db.pool()).await {
        Ok(SeedOutcome::AlreadySeeded) => {}
        Ok(SeedOutcome::Seeded {
            exercises,
            workouts,
            progress_logs,
        }) => tracing::info!(
            "Sample data: {} exercises, {} workouts, {} progress logs",
            exercises,
            workouts,
            progress_logs
        ),
        Err(e) => tracing::error!("Error seeding database: {}", e),
    }

    let app = routes::router(db);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server running on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
