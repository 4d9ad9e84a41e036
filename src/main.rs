//! CW20 token deployer.
//!
//! # Flow
//!
//! ```text
//!   CLI args ─┐
//!   env vars ─┼─▶ config ─▶ chain::connect ─▶ CosmWasmGateway ─┐
//!   TOML file ┘   (layered)   (wallet + LCD)                    │
//!                                                               ▼
//!   artifacts/<chain_id>.json ◀── deploy_token: upload → instantiate → query ×3 → assert
//! ```
//!
//! Any failure is logged and the process exits with status 1. On success the
//! last line on stdout is `FINISH`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use token_deploy::chain;
use token_deploy::config::resolve::resolve;
use token_deploy::config::{self, load_layered, DeployConfig, ObservabilityConfig, Overrides};
use token_deploy::observability::logging;
use token_deploy::{
    deploy_token, ArtifactStore, CosmWasmGateway, DeployError, DeployParams, FileArtifactStore,
};

#[derive(Parser)]
#[command(name = "token-deploy")]
#[command(about = "Upload, instantiate and verify the ASTRO CW20 token", long_about = None)]
struct Cli {
    /// TOML config file (falls back to $DEPLOY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the token bytecode (overrides $CW20_BINARY_PATH)
    #[arg(long)]
    binary: Option<String>,

    /// Initial signer balance (overrides $TOKEN_INITIAL_AMOUNT)
    #[arg(long)]
    initial_amount: Option<String>,

    /// Artifact directory (overrides $ARTIFACTS_PATH)
    #[arg(long)]
    artifacts: Option<String>,

    /// LCD endpoint (overrides $LCD_CLIENT_URL)
    #[arg(long)]
    lcd_url: Option<String>,

    /// Chain ID (overrides $CHAIN_ID)
    #[arg(long)]
    chain_id: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Upload, instantiate, verify and record the token (default)
    Deploy,
    /// Print the recorded artifact for the configured chain
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig {
                json_logs: cli.log_json,
                ..ObservabilityConfig::default()
            });
            tracing::error!(error = %e, "Configuration rejected");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability);

    tracing::info!(
        lcd_url = %config.network.lcd_url,
        chain_id = %config.network.chain_id,
        binary_path = %config.deploy.binary_path,
        artifacts_dir = %config.deploy.artifacts_dir,
        "Configuration loaded"
    );

    let result = match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Deploy => deploy(&config).await,
        Commands::Show => show(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

fn load(cli: &Cli) -> Result<DeployConfig, config::ConfigError> {
    let explicit = cli.config.as_ref().map(|p| p.to_string_lossy().into_owned());
    let config_path = resolve(explicit.as_deref(), config::CONFIG_PATH_ENV_VAR, "");
    let config_path = (!config_path.is_empty()).then(|| PathBuf::from(config_path));

    let overrides = Overrides {
        binary_path: cli.binary.clone(),
        initial_amount: cli.initial_amount.clone(),
        artifacts_dir: cli.artifacts.clone(),
        lcd_url: cli.lcd_url.clone(),
        chain_id: cli.chain_id.clone(),
        json_logs: cli.log_json,
    };

    load_layered(config_path.as_deref(), &overrides)
}

async fn deploy(config: &DeployConfig) -> Result<(), DeployError> {
    let params = DeployParams::try_from(config)?;

    let tx = chain::connect(&config.network)
        .await
        .map_err(DeployError::Setup)?;
    let gateway = CosmWasmGateway::new(tx);
    let store = FileArtifactStore::new(&config.deploy.artifacts_dir);

    let deployment = deploy_token(&gateway, &store, gateway.chain_id(), &params).await?;

    tracing::info!(
        code_id = deployment.code_id,
        address = %deployment.contract_address,
        balance = %deployment.balance,
        "Token deployed and verified"
    );
    println!("FINISH");
    Ok(())
}

fn show(config: &DeployConfig) -> Result<(), DeployError> {
    let store = FileArtifactStore::new(&config.deploy.artifacts_dir);
    let artifact = store.read(&config.network.chain_id)?;
    let pretty = serde_json::to_string_pretty(&artifact).map_err(DeployError::Encode)?;
    println!("{}", pretty);
    Ok(())
}
