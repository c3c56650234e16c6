//! Dashboard Transporter CLI
//!
//! Command-line front end for the dashboard-transporter backend.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file + env + flags
//!            │
//!            ▼
//!   ┌────────────────┐     GET <candidate>/health      ┌───────────────────┐
//!   │ BackendLocator │ ──────────────────────────────▶ │ candidate backends│
//!   └───────┬────────┘   (first 2xx wins, memoized)    └───────────────────┘
//!           │ base URL
//!           ▼
//!   ┌────────────────┐   GET/POST JSON   ┌─────────────────────────────┐
//!   │TransporterClient│ ───────────────▶ │ /environments /dashboards   │
//!   └───────┬────────┘                   │ /folders /dashboards/import │
//!           ▼                            └─────────────────────────────┘
//!   ┌────────────────┐
//!   │ TransporterApi │ ◀── ImportSelection (defaults + validation)
//!   └────────────────┘
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dashboard_transporter::config::{self, loader::normalize_override, validation, ConfigError};
use dashboard_transporter::grafana::GrafanaUserClient;
use dashboard_transporter::health::BackendLocator;
use dashboard_transporter::http::{build_http_client, TransporterClient};
use dashboard_transporter::observability::logging::init_logging;
use dashboard_transporter::transporter::{ImportOptions, ImportResponse, TransporterApi};

#[derive(Parser)]
#[command(name = "dashboard-transporter")]
#[command(about = "Copy Grafana dashboards between environments", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL tried before the configured candidates
    #[arg(short, long)]
    backend: Option<String>,

    /// Origin used to resolve relative backend candidates
    #[arg(long)]
    origin: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the backend base URL
    Resolve,
    /// List environments known to the backend
    Environments,
    /// List dashboards of an environment
    Dashboards {
        #[arg(long)]
        env: String,
    },
    /// List folders of an environment
    Folders {
        #[arg(long)]
        env: String,
    },
    /// Copy dashboards from one environment into a folder of another
    Import {
        /// Source environment id (default: first listed)
        #[arg(long)]
        source: Option<String>,

        /// Target environment id (default: second listed)
        #[arg(long)]
        target: Option<String>,

        /// Target folder uid (default: General, else the first folder)
        #[arg(long)]
        folder: Option<String>,

        /// Dashboard uid to import; repeatable
        #[arg(long = "uid")]
        uids: Vec<String>,

        /// Import every dashboard of the source environment
        #[arg(long, conflicts_with = "uids")]
        all: bool,

        /// Login or email (comma-separated) granted access on the target
        #[arg(long)]
        requested_by: Option<String>,
    },
    /// Show how the backend sees a user in an environment
    DebugUser {
        #[arg(long)]
        env: String,

        username: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(url) = normalize_override(cli.backend.clone()) {
        config.backend.override_url = Some(url);
    }
    if let Some(origin) = cli.origin.clone() {
        config.backend.origin = Some(origin);
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    validation::validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    let http = build_http_client(&config.timeouts)?;
    let locator = Arc::new(BackendLocator::from_config(&config, http.clone())?);

    tracing::info!(
        candidates = ?locator.candidates().as_slice(),
        origin = ?config.backend.origin,
        forward_org_id = config.identity.forward_org_id,
        "Configuration loaded"
    );

    let user = match GrafanaUserClient::from_config(&config.grafana, http.clone()) {
        Some(grafana) => grafana.current_user().await,
        None => None,
    };
    let logged_user = user.as_ref().map(|u| u.identity().to_string()).unwrap_or_default();

    let client = TransporterClient::new(http, locator)
        .with_identity(&config.identity, user.as_ref().and_then(|u| u.org_id));
    let api = TransporterApi::new(client);

    match cli.command {
        Commands::Resolve => {
            let base = api.client().locator().resolve().await?;
            println!("{base}");
        }
        Commands::Environments => {
            let envs = api.list_environments().await?;
            if cli.json {
                print_json(&envs)?;
            } else {
                for env in &envs {
                    println!("{:<12} {:<24} {}", env.id, env.name, env.url);
                }
            }
        }
        Commands::Dashboards { env } => {
            let dashboards = api.list_dashboards(&env).await?;
            if cli.json {
                print_json(&dashboards)?;
            } else {
                for d in &dashboards {
                    println!("{:<40} {:>6}  {}", d.uid, d.id, d.title);
                }
            }
        }
        Commands::Folders { env } => {
            let folders = api.list_folders(&env).await?;
            if cli.json {
                print_json(&folders)?;
            } else {
                for f in &folders {
                    println!("{:<40} {}", f.uid, f.label());
                }
            }
        }
        Commands::Import {
            source,
            target,
            folder,
            uids,
            all,
            requested_by,
        } => {
            let options = ImportOptions {
                source,
                target,
                folder,
                uids,
                all,
                requested_by,
            };
            let selection = api.prepare_import(&options).await?;
            let response = api.import_selection(&selection, &logged_user).await?;
            if cli.json {
                print_json(&response)?;
            } else {
                print_import(&response);
            }
            if response.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::DebugUser { env, username } => {
            let value = api.debug_user(&env, &username).await?;
            print_json(&value)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_import(response: &ImportResponse) {
    match response {
        ImportResponse::PerUid(results) => {
            for r in results {
                println!(
                    "{:<8} {} -> {}  {}",
                    r.status,
                    r.source_uid,
                    r.target_uid.as_deref().unwrap_or("-"),
                    r.message.as_deref().unwrap_or_default()
                );
            }
            println!("{}", response.tally());
        }
        ImportResponse::Summary(_) => {
            println!("{}", response.message().unwrap_or("Import finished."));
        }
    }
}
