use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_form::controllers::{health::HealthState, tts::TtsController};
use tts_form::domain::presenter::ResultPresenter;
use tts_form::domain::tts::TtsService;
use tts_form::infrastructure::config::{Config, LogFormat, TtsProvider};
use tts_form::infrastructure::http::{build_router, start_http_server};
use tts_form::infrastructure::repositories::{
    GoogleTtsRepository, OpenAiTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Text-to-Speech Converter on {}:{}",
        config.host,
        config.port
    );

    // Create the speech provider
    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Google => {
            tracing::info!(
                base_url = %config.google_tts_base_url,
                timeout_secs = config.tts_request_timeout_secs,
                "Using Google Translate TTS"
            );
            Arc::new(GoogleTtsRepository::new(
                &config.google_tts_base_url,
                config.tts_request_timeout(),
            )?)
        }
        TtsProvider::OpenAi => {
            tracing::info!(model = %config.openai_tts_model, "Using OpenAI TTS");
            let api_key = config.openai_api_key.as_deref().unwrap_or_default();
            Arc::new(OpenAiTtsRepository::new(
                api_key,
                &config.openai_tts_model,
                &config.openai_tts_voice,
            ))
        }
    };

    let cache_settings = config.cache_settings();
    tracing::info!(
        max_bytes = cache_settings.max_bytes,
        time_to_idle = ?cache_settings.time_to_idle,
        "TTS cache configured"
    );

    // === DEPENDENCY INJECTION SETUP ===
    let tts_service = Arc::new(TtsService::new(tts_repo, cache_settings));
    let presenter = ResultPresenter::new(tts_service.clone());
    let tts_controller = Arc::new(TtsController::new(presenter));
    let health_state = Arc::new(HealthState {
        tts_service,
        provider: config.tts_provider.as_str(),
        started_at: chrono::Utc::now(),
    });

    let app = build_router(&config, tts_controller, health_state);
    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tts_form=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
