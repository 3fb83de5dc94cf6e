// Configuration module entry point
// Loads settings from an optional file and the process environment

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub use state::AppState;
pub use types::{
    AddressFamily, Config, LoggingConfig, RawSettings, RedisConfig, RedisSocketConfig,
    ServerConfig,
};

/// Optional config file looked up in the working directory (extension resolved by `config`)
pub const DEFAULT_CONFIG_FILE: &str = "pagekv";

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 1337;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_KEEP_ALIVE_MS: u64 = 5_000;
const DEFAULT_RECONNECT_WAITING_TIME_MS: u64 = 5_000;
const DEFAULT_ACCESS_LOG_FORMAT: &str = "combined";

impl Config {
    /// Load configuration from `pagekv.toml` (if present) and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE, config::Environment::default())
    }

    /// Load configuration from the given file path (without extension) and environment source
    pub fn load_from(
        config_path: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let raw: RawSettings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(Self::from_raw(&raw))
    }

    /// Build typed configuration, replacing missing, zero or malformed numbers by their defaults
    pub fn from_raw(raw: &RawSettings) -> Self {
        Self {
            server: ServerConfig {
                host: text(raw.server_host.as_deref())
                    .unwrap_or(DEFAULT_SERVER_HOST)
                    .to_string(),
                port: number(raw.server_port.as_deref()).unwrap_or(DEFAULT_SERVER_PORT),
            },
            redis: RedisConfig {
                url: owned_text(raw.redis_url.as_deref()),
                database: number(raw.redis_database.as_deref()),
                username: owned_text(raw.redis_username.as_deref()),
                password: owned_text(raw.redis_password.as_deref()),
                socket: RedisSocketConfig {
                    host: owned_text(raw.redis_socket_host.as_deref()),
                    port: number(raw.redis_socket_port.as_deref()),
                    path: owned_text(raw.redis_socket_path.as_deref()),
                    connect_timeout: millis(
                        raw.redis_socket_connect_timeout.as_deref(),
                        DEFAULT_CONNECT_TIMEOUT_MS,
                    ),
                    family: AddressFamily::from_number(
                        number(raw.redis_socket_family.as_deref()).unwrap_or(0),
                    ),
                    keep_alive: millis(
                        raw.redis_socket_keep_alive.as_deref(),
                        DEFAULT_KEEP_ALIVE_MS,
                    ),
                    no_delay: flag(raw.redis_socket_no_delay.as_deref()),
                    reconnect_interval: millis(
                        raw.redis_socket_reconnect_waiting_time.as_deref(),
                        DEFAULT_RECONNECT_WAITING_TIME_MS,
                    ),
                },
            },
            logging: LoggingConfig {
                access_log_format: text(raw.log_access_format.as_deref())
                    .unwrap_or(DEFAULT_ACCESS_LOG_FORMAT)
                    .to_string(),
                access_log_file: owned_text(raw.log_access_file.as_deref()),
                error_log_file: owned_text(raw.log_error_file.as_deref()),
            },
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .host
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.server.port))
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.host))
    }
}

/// Non-empty, trimmed text value
fn text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn owned_text(raw: Option<&str>) -> Option<String> {
    text(raw).map(ToString::to_string)
}

/// Parsed number; zero counts as unset
fn number<T>(raw: Option<&str>) -> Option<T>
where
    T: FromStr + Default + PartialEq,
{
    text(raw)
        .and_then(|v| v.parse::<T>().ok())
        .filter(|v| *v != T::default())
}

fn millis(raw: Option<&str>, default_ms: u64) -> Duration {
    Duration::from_millis(number(raw).unwrap_or(default_ms))
}

fn flag(raw: Option<&str>) -> bool {
    matches!(text(raw), Some("true" | "1"))
}
