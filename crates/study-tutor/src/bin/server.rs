//! Study tutor server binary
//!
//! Run with: cargo run -p study-tutor --bin study-tutor-server

use std::path::PathBuf;

use study_tutor::{config::TutorConfig, server::TutorServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_tutor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                      AI Study Buddy                       ║
║        Notes, Explanations, and Practice Quizzes          ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration; an optional path argument points at a TOML file
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = TutorConfig::load(config_path.as_deref())?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());
    tracing::info!("  - Max file size: {} MB", config.extraction.max_file_size_mb);

    let server = TutorServer::new(config)?;

    // Probe the LLM backend; the server still starts without it
    match server.state().llm_provider().health_check().await {
        Ok(true) => tracing::info!("LLM backend is reachable"),
        _ => {
            let llm = &server.state().config().llm;
            tracing::warn!("LLM backend not available at {}", llm.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Install: brew install ollama");
            tracing::warn!("  2. Start: ollama serve");
            tracing::warn!("  3. Pull the model: ollama pull {}", llm.generate_model);
        }
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/api/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload    - Upload study materials");
    println!("  POST /api/notes     - Generate study notes");
    println!("  POST /api/quiz      - Generate a practice quiz");
    println!("  POST /api/ask       - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
