use anyhow::{Context, Result};
use clap::Parser;
use cli::commands::Mode;
use cli::session::Session;
use cli::shell;
use learnbot_core::config;
use learnbot_core::engine::Engine;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "learnbot")]
#[command(about = "Chatbot that learns answers to the questions it is asked", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Knowledge base file (overrides store.path from config)
    #[arg(short, long)]
    store: Option<String>,

    /// Start in chat or command-only mode
    #[arg(long, value_enum, default_value_t = Mode::Chat)]
    mode: Mode,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so the conversation on stdout stays readable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref()).context("load config")?;
    if let Some(store) = cli.store {
        cfg.store.path = store;
    }
    let engine = Engine::from_config(&cfg).context("build engine")?;
    info!(
        "Using knowledge base {} ({} entries)",
        engine.store_path().display(),
        engine.knowledge().len()
    );
    let mut session = Session::new(engine, &cfg.store.backup_path).with_mode(cli.mode);

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(&mut session, stdin, &mut std::io::stdout()).await?;
    Ok(())
}
