use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use speech_lab::application::services::SpeechPipeline;
use speech_lab::infrastructure::audio::TranscriptionEngineFactory;
use speech_lab::infrastructure::llm::LlmClientFactory;
use speech_lab::infrastructure::observability::{TracingConfig, init_tracing};
use speech_lab::infrastructure::storage::LocalAudioStore;
use speech_lab::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let audio_store = Arc::new(
        LocalAudioStore::new(&settings.storage.upload_dir)
            .context("Failed to prepare upload directory")?,
    );

    let transcription_settings = settings.transcription.clone();
    let transcription_engine = tokio::task::spawn_blocking(move || {
        TranscriptionEngineFactory::create(&transcription_settings)
    })
    .await
    .context("Transcription engine loader panicked")?
    .context("Failed to initialize transcription engine")?;

    let llm_client =
        LlmClientFactory::create(&settings.llm).context("Failed to initialize Gemini client")?;

    let pipeline = SpeechPipeline::new(audio_store, transcription_engine, llm_client)
        .with_cleanup_on_failure(settings.transcription.cleanup_on_failure);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;

    let router = create_router(AppState::new(pipeline, settings));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
