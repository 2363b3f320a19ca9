use habit_api_rust::config::AppConfig;
use habit_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Refuses to start when any required upstream credential is missing
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Habit API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
