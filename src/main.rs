use std::sync::Arc;

use anyhow::Context;
use blog_generator::{AppState, app, config::Config, generation::InferenceClient};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_generator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Built once; every request shares this client.
    let generator = InferenceClient::new(
        &config.inference_url,
        &config.model_id,
        config.hf_token.as_deref(),
    )?;
    info!("Using model {} via {}", config.model_id, generator.endpoint());

    let state = AppState::new(Arc::new(generator), config.model_id.as_str())
        .with_public_url(config.public_url.clone());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
