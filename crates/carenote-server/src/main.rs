use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use carenote_kb::cache::FileCache;
use carenote_kb::fetch::{HttpFetcher, RetryPolicy};
use carenote_kb::loader::KbLoader;
use carenote_polish::bedrock::BedrockPolisher;
use carenote_polish::polish::Polisher;
use carenote_server::config;
use carenote_server::state::{AppState, KbService};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = config::load_config()?;

    // A broken form definition stops startup here rather than at first render.
    let forms = carenote_forms::register_all()?;

    let retry = RetryPolicy {
        max_retries: config.kb_retries,
        initial_backoff: Duration::from_millis(config.kb_backoff_ms),
    };
    let loader = KbLoader::new(
        HttpFetcher::default(),
        config.kb_base_url.clone(),
        FileCache::new(&config.cache_dir),
    )
    .with_retry(retry);
    let kb = Arc::new(KbService::new(loader));

    let warm = kb.clone();
    tokio::spawn(async move {
        if let Err(e) = warm.get().await {
            tracing::warn!(error = %e, "initial KB load failed; will retry on request");
        }
    });

    let polisher: Option<Arc<dyn Polisher>> = match &config.polish {
        Some(settings) => {
            let polisher = BedrockPolisher::from_settings(
                &settings.region,
                settings.profile.as_deref(),
                &settings.model_id,
            )
            .await;
            tracing::info!(model = %settings.model_id, "AI polish enabled");
            Some(Arc::new(polisher))
        }
        None => {
            tracing::info!("AI polish not configured");
            None
        }
    };

    let state = AppState {
        forms: Arc::new(forms),
        kb,
        polisher,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, kb = %config.kb_base_url, "listening");

    axum::serve(listener, carenote_server::app(state)).await?;
    Ok(())
}
