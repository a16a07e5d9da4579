use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use funding_atlas_core::{find_config_file, load_config, ConfigSource, DEFAULT_SITE_PORT};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Funding Atlas - serves US atlas topologies bundled with funding statistics"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $FUNDING_ATLAS_CONFIG, ./site.toml,
    /// $XDG_CONFIG_HOME/funding-atlas/site.toml, /etc/funding-atlas/site.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "FUNDING_ATLAS_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "FUNDING_ATLAS_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "FUNDING_ATLAS_PORT")]
    pub port: Option<String>,

    /// Directory holding replacement funding datasets
    /// Uses the copies compiled into the binary when unset
    #[arg(long, env = "FUNDING_ATLAS_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Directory containing the front-end static files
    #[arg(short, long, env = "FUNDING_ATLAS_UI_DIR")]
    pub ui_dir: Option<String>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_SITE_PORT.to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    pub fn data_dir(&self) -> Option<String> {
        self.data_dir.clone()
    }

    /// Fill every unset field from `other`.
    pub fn or(self, other: Cli) -> Cli {
        Cli {
            config: self.config.or(other.config),
            level: self.level.or(other.level),
            domain: self.domain.or(other.domain),
            port: self.port.or(other.port),
            data_dir: self.data_dir.or(other.data_dir),
            ui_dir: self.ui_dir.or(other.ui_dir),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
///
/// Returns the merged settings and the file they were read from, so the
/// caller can report it once logging is up.
pub fn get_config_info() -> (Cli, ConfigSource) {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("FUNDING_ATLAS_CONFIG", "site.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_else(|e| {
        eprintln!("ignoring config file {}: {}", source, e);
        Cli::default()
    });

    let merged = merge_config(cli_args, file_config, env::var("RUST_LOG").ok());
    (merged, source)
}

/// CLI args override file config (env vars are handled by clap). The log
/// level also honours `RUST_LOG`, which sits between the flag/env var and
/// the file.
pub fn merge_config(cli_args: Cli, file_config: Cli, rust_log: Option<String>) -> Cli {
    let level = cli_args
        .level
        .clone()
        .or(rust_log)
        .or_else(|| file_config.level.clone());
    Cli {
        level,
        ..cli_args.or(file_config)
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli.level.as_deref().unwrap_or("info");

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                timestamp,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
