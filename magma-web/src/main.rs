use anyhow::{Context, Result};

use magma_web::api::{self, AppState};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let bind = std::env::var("MAGMA_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let repo_url = std::env::var("MAGMA_REPO_URL")
        .unwrap_or_else(|_| magma_maven::repo::DEFAULT_REPO_URL.to_string());

    log::info!("Upstream repository: {}", repo_url);

    let state = AppState::new(repo_url)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    log::info!("Serving Magma release metadata on {}", bind);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
