// Configuration types module
// Defines the raw settings read from the environment and the typed configuration built from them

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Settings exactly as they arrive from the config sources.
///
/// Every value is kept as a string so that a malformed number never aborts
/// startup: it is parsed later and silently replaced by its default.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RawSettings {
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub redis_url: Option<String>,
    pub redis_database: Option<String>,
    pub redis_username: Option<String>,
    pub redis_password: Option<String>,
    pub redis_socket_host: Option<String>,
    pub redis_socket_port: Option<String>,
    pub redis_socket_path: Option<String>,
    pub redis_socket_connect_timeout: Option<String>,
    pub redis_socket_family: Option<String>,
    pub redis_socket_keep_alive: Option<String>,
    pub redis_socket_no_delay: Option<String>,
    pub redis_socket_reconnect_waiting_time: Option<String>,
    pub log_access_format: Option<String>,
    pub log_access_file: Option<String>,
    pub log_error_file: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Redis session configuration
///
/// `database` and `socket.port` stay `None` unless explicitly set, so that a
/// value carried by `url` is not clobbered by a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub url: Option<String>,
    pub database: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub socket: RedisSocketConfig,
}

/// Transport-level options for the Redis connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSocketConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Unix socket path, takes precedence over host/port
    pub path: Option<String>,
    pub connect_timeout: Duration,
    pub family: AddressFamily,
    pub keep_alive: Duration,
    pub no_delay: bool,
    pub reconnect_interval: Duration,
}

/// IP family restriction applied when resolving the Redis host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    Any,
    V4,
    V6,
}

impl AddressFamily {
    /// Map the numeric family (`4`, `6`, anything else) used by the environment.
    pub const fn from_number(family: u8) -> Self {
        match family {
            4 => Self::V4,
            6 => Self::V6,
            _ => Self::Any,
        }
    }

    pub const fn accepts(self, addr: &SocketAddr) -> bool {
        match self {
            Self::Any => true,
            Self::V4 => addr.is_ipv4(),
            Self::V6 => addr.is_ipv6(),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::V4 => f.write_str("IPv4"),
            Self::V6 => f.write_str("IPv6"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    pub error_log_file: Option<String>,
}
