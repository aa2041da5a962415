use chat_agent::{
    agent::Agent,
    providers::factory,
    swaps::http::HttpSwapService,
};
use chat_agent_server::{app, configuration, state::AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = configuration::Settings::new()?;
    let timeout = settings.http.timeout();

    // Build the collaborators and hand them to the agent
    let provider_config = settings.provider.into_config(timeout)?;
    let provider_type = provider_config.provider_type();
    let provider = factory::get_provider(provider_config)?;
    let swaps = Arc::new(HttpSwapService::new(settings.swap.into_config(timeout))?);
    let state = AppState::new(Agent::new(provider, swaps));

    let listener = tokio::net::TcpListener::bind(settings.server.socket_addr()?).await?;
    info!(
        "listening on {} with {} provider",
        listener.local_addr()?,
        provider_type
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
