use std::sync::Arc;

use anyhow::Context;

use agri_yield::app_router;
use agri_yield::chat::{ChatAssistant, ChatClient};
use agri_yield::config::AppConfig;
use agri_yield::prediction::create_predictor;
use agri_yield::store::{JsonFileStore, KeyValueStore};
use agri_yield::wizard::WizardManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    eprintln!("🌾 Agri Yield v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Predictor: {:?}", config.predictor);
    eprintln!("   Predict URL: {}", config.predict_url);
    eprintln!("   Chat URL: {}", config.chat_url);
    eprintln!("   Data: {}", config.data_path.display());
    eprintln!("   API: http://0.0.0.0:{}/api/wizard\n", config.port);

    // ── Prediction ───────────────────────────────────────────────────────
    let predictor = create_predictor(&config.predictor_config())?;
    let wizard = Arc::new(WizardManager::new(predictor));
    tracing::info!(predictor = wizard.predictor_name(), "Wizard ready");

    // ── Chat ─────────────────────────────────────────────────────────────
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.data_path));
    let client = ChatClient::new(&config.chat_url, config.request_timeout)?;
    let assistant = Arc::new(ChatAssistant::load(client, store).await);

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = app_router(wizard, assistant);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}
