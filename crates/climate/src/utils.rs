use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use hawaii_climate_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_DATABASE, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_PORT,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Hawaii Climate API - precipitation, station and temperature statistics"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $HAWAII_CLIMATE_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/hawaii-climate/climate.toml, /etc/hawaii-climate/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "HAWAII_CLIMATE_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "HAWAII_CLIMATE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "HAWAII_CLIMATE_PORT")]
    pub port: Option<String>,

    /// SQLite file holding the measurement and station tables
    #[arg(short, long, env = "HAWAII_CLIMATE_DATABASE")]
    #[serde(alias = "db")]
    pub database: Option<String>,

    /// Size of the read-only connection pool
    #[arg(short, long, env = "HAWAII_CLIMATE_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
            .max(1)
    }

    /// CLI args (and env vars, handled by clap) win over the config file
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            host: self.host.or(file_config.host),
            port: self.port.or(file_config.port),
            database: self.database.or(file_config.database),
            max_connections: self.max_connections.or(file_config.max_connections),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("HAWAII_CLIMATE_CONFIG", "climate.toml")
    };

    if let Some(path) = source.path() {
        log::info!("Loading config from: {}", path.display());
    }

    let file_config: Cli = load_config(&source).unwrap_or_else(|e| {
        eprintln!("ignoring unreadable config file {}: {}", source, e);
        Cli::default()
    });

    cli_args.merge(file_config)
}

/// `--level`, then `RUST_LOG`, then `info`; unknown names also mean `info`
pub fn get_log_level(cli: &Cli) -> LevelFilter {
    cli.level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Stdout logger: our own targets and the request log follow `level`, sqlx
/// only reports warnings.
pub fn setup_logger(level: LevelFilter) -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::Cyan)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .level(level)
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("climate", level)
        .level_for("http_request", level)
        .level_for("http_response", level)
        .format(move |out, message, record| {
            let timestamp = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "{} {:>5} [{}] {}",
                timestamp,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
