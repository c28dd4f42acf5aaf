use softsell_ai::{GenerationService, OpenAiClient};
use softsell_conversation::Resolver;
use softsell_server::{app, config::ServerConfig, state::AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let generator: Option<Arc<dyn GenerationService>> = match config.credential() {
        Some(credential) => match OpenAiClient::new(credential, config.generation.clone()) {
            Ok(client) => {
                tracing::info!(model = %client.settings().model, "Generation service enabled");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build generation client, running offline");
                None
            }
        },
        None => {
            tracing::info!("No API key configured, answering from the offline tables only");
            None
        }
    };

    let resolver = Resolver::new(generator).with_pacing(config.pacing);
    let state = Arc::new(AppState::new(resolver));

    // Spawn periodic eviction of abandoned widgets
    let sweep_state = Arc::clone(&state);
    let idle_timeout = config.retention.idle_timeout();
    let cleanup_interval = config.retention.cleanup_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let evicted = sweep_state.evict_idle(idle_timeout).await;
            if evicted > 0 {
                tracing::debug!(evicted_widgets = evicted, "Periodic widget cleanup");
            }
        }
    });

    let router = app::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
