use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use diamond_core::{CacheSettings, NullCache, PredictionService, catalog, unix_timestamp};
use diamond_server::auth::issue_token;
use diamond_server::config::DEFAULT_JWT_SECRET;

#[derive(Parser)]
#[command(name = "diamond", version, about = "Baseball analytics model API tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a bearer token accepted by the server
    Token {
        /// Subject claim to embed
        #[arg(short, long, default_value = "diamond-cli")]
        subject: String,

        /// Lifetime in seconds (0 = no expiry)
        #[arg(short, long, default_value_t = 3600)]
        ttl: u64,

        /// Signing secret (must match the server's JWT_SECRET)
        #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
        secret: String,
    },

    /// Run a prediction locally, without the server or a cache
    Predict {
        /// Model type (team, player, game, ...)
        #[arg(short, long)]
        model: String,

        /// Path to a JSON input file, or "-" for stdin
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, env = "MODEL_VERSION", default_value = "1.0.0")]
        model_version: String,
    },

    /// Print the metadata for a model type
    Info {
        #[arg(short, long)]
        model: String,

        #[arg(long, env = "MODEL_VERSION", default_value = "1.0.0")]
        model_version: String,
    },

    /// Print the evaluation metrics payload
    Metrics {
        #[arg(long, env = "MODEL_VERSION", default_value = "1.0.0")]
        model_version: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("diamond=warn".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token {
            subject,
            ttl,
            secret,
        } => cmd_token(&subject, ttl, &secret)?,
        Commands::Predict {
            model,
            input,
            model_version,
        } => cmd_predict(&model, &input, &model_version).await?,
        Commands::Info {
            model,
            model_version,
        } => {
            let info = catalog::model_info(&model, &model_version);
            let mut value = serde_json::to_value(info)?;
            value["timestamp"] = unix_timestamp().into();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Metrics { model_version } => {
            let mut value = serde_json::to_value(catalog::model_metrics(&model_version))?;
            value["timestamp"] = unix_timestamp().into();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn cmd_token(subject: &str, ttl: u64, secret: &str) -> Result<()> {
    if secret == DEFAULT_JWT_SECRET {
        tracing::warn!("Signing with the default secret; set JWT_SECRET to match the server");
    }
    let ttl = (ttl > 0).then(|| Duration::from_secs(ttl));
    let token = issue_token(secret, subject, ttl).context("Failed to sign token")?;
    println!("{token}");
    Ok(())
}

async fn cmd_predict(model: &str, input_path: &Path, model_version: &str) -> Result<()> {
    let raw = read_input(input_path)?;
    let input: serde_json::Value =
        serde_json::from_str(&raw).context("Invalid JSON in input")?;

    let service = PredictionService::new(NullCache, CacheSettings::disabled(), model_version);
    let result = service
        .predict(model, &input)
        .await
        .context("Prediction failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}
