//! pylink-consent: inspect and edit the persisted cookie-consent record.
//!
//! Usage:
//!   pylink-consent status                          → is there valid consent?
//!   pylink-consent show                            → print the stored record
//!   pylink-consent accept-all | reject             → record a banner decision
//!   pylink-consent save --analytics --marketing    → record custom preferences
//!   pylink-consent clear                           → forget the decision

use anyhow::Context;
use clap::{Parser, Subcommand};
use pylink_consent_core::types::{AppConfig, Config};
use pylink_consent_core::{BannerAction, BannerController, ConsentStore, PageHost, RedbStore};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pylink-consent",
    about = "Inspect and edit the persisted cookie-consent record",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir + /pylink-consent)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config file (TOML). Defaults to <data-dir>/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether valid consent is stored. Expired records are purged.
    Status,
    /// Print the stored record as JSON, expired or not
    Show,
    /// Accept all cookie categories
    AcceptAll,
    /// Keep essential cookies only
    Reject,
    /// Save custom preferences
    Save {
        /// Allow analytics cookies
        #[arg(long)]
        analytics: bool,
        /// Allow marketing cookies
        #[arg(long)]
        marketing: bool,
    },
    /// Remove the stored record
    Clear,
}

/// No page to show a banner on; visibility changes and reloads are logged.
struct TerminalHost;

impl PageHost for TerminalHost {
    fn set_banner_visible(&mut self, visible: bool) {
        debug!(visible, "banner visibility");
    }

    fn reload(&mut self) {
        info!("reload requested");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let core_config = Config {
        base_path: data_dir,
    };

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| core_config.app_config_path());
    let app_config = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let problems = app_config.validate();
    let app_config = app_config.with_defaults_for_invalid();

    init_tracing(log_filter(&app_config));
    for problem in &problems {
        warn!("config: {problem}");
    }

    let store = RedbStore::open(&core_config)
        .with_context(|| format!("failed to open {}", core_config.db_path().display()))?;
    let key = app_config.consent.storage_key()?;
    let mut controller = BannerController::new(ConsentStore::with_key(store, key), TerminalHost);

    let now = SystemTime::now();

    match cli.command {
        Commands::Status => {
            if controller.on_page_load(now)? {
                println!("valid consent stored");
            } else {
                println!("no valid consent");
            }
        }
        Commands::Show => match controller.consent().get_consent()? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("no consent stored"),
        },
        Commands::AcceptAll => controller.dispatch(BannerAction::AcceptAll, now)?,
        Commands::Reject => controller.dispatch(BannerAction::Reject, now)?,
        Commands::Save {
            analytics,
            marketing,
        } => {
            controller.dispatch(BannerAction::SetAnalytics(analytics), now)?;
            controller.dispatch(BannerAction::SetMarketing(marketing), now)?;
            controller.dispatch(BannerAction::SavePreferences, now)?;
        }
        Commands::Clear => controller.clear_consent()?,
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset. A blank configured filter falls back to `info`.
fn log_filter(config: &AppConfig) -> &str {
    let filter = config.logging.filter.trim();
    if filter.is_empty() { "info" } else { filter }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pylink-consent")
}
