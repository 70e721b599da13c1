// ABOUTME: Entry point for the equiedu binary.
// ABOUTME: Parses CLI arguments, initializes tracing, loads config, and serves or answers one request.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use equiedu_agent::providers::GeminiGenerator;
use equiedu_agent::{Provider, create_generator, standard_orchestrator};
use equiedu_core::{Context, Intent, Orchestrator};
use equiedu_server::{AppState, EquiConfig, create_router};

/// Multi-agent learning assistant.
#[derive(Debug, Parser)]
#[command(name = "equiedu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the web form and JSON API.
    Serve {
        /// Listen address, overrides EQUIEDU_BIND.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run one learning request and print the sections.
    Ask {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "")]
        learner: String,
        #[arg(long, default_value = "simple")]
        style: String,
        #[arg(long, default_value = "none")]
        accessibility: String,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        ses: Option<String>,
        /// content or assessment; repeat for both.
        #[arg(long = "intent")]
        intents: Vec<Intent>,
        /// Print the section map as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List Gemini models available to the configured key.
    Models,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("equiedu=debug,tower_http=debug")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_orchestrator(config: &EquiConfig) -> anyhow::Result<Orchestrator> {
    let generator = create_generator(&config.generator)?;
    Ok(standard_orchestrator(generator, config.generation_timeout))
}

async fn serve(config: EquiConfig, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or(config.bind);
    let orchestrator = build_orchestrator(&config)?;
    let provider_label = format!("{} / {}", config.generator.provider, config.generator.model);
    let state = Arc::new(AppState::new(orchestrator, config.history_limit, provider_label));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "equiedu listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .context("equiedu server exited unexpectedly")
}

async fn ask(config: EquiConfig, context: Context, intents: Vec<Intent>, json: bool) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(&config)?;
    let intents: BTreeSet<Intent> = intents.into_iter().collect();
    let response = orchestrator.handle_request(&intents, &context).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.to_plain_text());
    }
    Ok(())
}

async fn models(config: EquiConfig) -> anyhow::Result<()> {
    if config.generator.provider != Provider::Gemini {
        anyhow::bail!("model listing is only available for the gemini provider");
    }
    let gemini = GeminiGenerator::new(
        config.generator.api_key,
        config.generator.base_url,
        config.generator.model,
    )
    .with_list_timeout(config.generation_timeout);
    let names = gemini.list_models().await?;

    println!("✅ Available Gemini models:");
    for name in names {
        println!("  - {}", name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let config = EquiConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Ask {
            topic,
            learner,
            style,
            accessibility,
            gender,
            ses,
            intents,
            json,
        } => {
            let context = Context::new(learner, topic)
                .with_style(style)
                .with_accessibility(accessibility)
                .with_demographics(gender.as_deref(), ses.as_deref());
            ask(config, context, intents, json).await
        }
        Command::Models => models(config).await,
    }
}
