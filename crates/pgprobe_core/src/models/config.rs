//! Connection configuration, populated once from the environment.

use crate::error::CheckError;
use std::time::Duration;

/// Default server hostname when `DB_HOST` is unset.
pub const DEFAULT_HOST: &str = "localhost";
/// Default server port when `DB_PORT` is unset.
pub const DEFAULT_PORT: u16 = 5432;
/// Default database name when `DB_NAME` is unset.
pub const DEFAULT_DATABASE: &str = "stock_management";
/// Default login user when `DB_USER` is unset.
pub const DEFAULT_USER: &str = "stock_app_user";
/// Default login password when `DB_PASSWORD` is unset.
pub const DEFAULT_PASSWORD: &str = "app_secure_password";
/// Maximum number of connections held by the pool.
pub const DEFAULT_POOL_MAX_SIZE: usize = 5;
/// How long an idle connection may linger (applied as a TCP keepalive).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(30_000);
/// How long a single connection attempt may take.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Mask token printed after the first three characters of the password.
pub const PASSWORD_MASK: &str = "***";

/// Configuration for one checker run.
///
/// Read once at startup and immutable afterwards. The password lives here
/// for the lifetime of the run; it is only ever printed masked.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Server hostname or IP
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name
    pub database: String,
    /// Login username
    pub user: String,
    /// Login password
    pub password: String,
    /// Maximum concurrent connections in the pool
    pub pool_max_size: usize,
    /// Idle timeout for pooled connections
    pub idle_timeout: Duration,
    /// Timeout for one connection attempt
    pub connect_timeout: Duration,
}

impl CheckConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, CheckError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an injected lookup.
    ///
    /// Tests pass a closure instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CheckError> {
        let port = match lookup("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                CheckError::config(format!("DB_PORT must be a port number, got {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Get the password as printed in the report: first three characters
    /// followed by the mask token, never the full secret.
    pub fn masked_password(&self) -> String {
        let visible: String = self.password.chars().take(3).collect();
        format!("{visible}{PASSWORD_MASK}")
    }

    /// Get the display connection string (without password).
    pub fn display_url(&self) -> String {
        format!("postgresql://{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = CheckConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.user, DEFAULT_USER);
        assert_eq!(config.password, DEFAULT_PASSWORD);
        assert_eq!(config.pool_max_size, DEFAULT_POOL_MAX_SIZE);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = CheckConfig::from_lookup(|key| match key {
            "DB_HOST" => Some("db.internal".to_string()),
            "DB_PORT" => Some("6432".to_string()),
            "DB_NAME" => Some("inventory".to_string()),
            "DB_USER" => Some("probe".to_string()),
            "DB_PASSWORD" => Some("hunter22".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.database, "inventory");
        assert_eq!(config.user, "probe");
        assert_eq!(config.password, "hunter22");
    }

    #[test]
    fn malformed_port_is_a_config_error() {
        let result = CheckConfig::from_lookup(|key| match key {
            "DB_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(CheckError::Config { .. })));
    }

    #[test]
    fn masked_password_shows_three_characters_and_the_mask() {
        let mut config = CheckConfig::from_lookup(|_| None).unwrap();
        config.password = "app_secure_password".to_string();
        assert_eq!(config.masked_password(), "app***");
    }

    #[test]
    fn masked_password_with_exactly_three_characters() {
        let mut config = CheckConfig::from_lookup(|_| None).unwrap();
        config.password = "abc".to_string();
        assert_eq!(config.masked_password(), "abc***");
    }

    #[test]
    fn masked_password_is_char_safe_for_multibyte_input() {
        let mut config = CheckConfig::from_lookup(|_| None).unwrap();
        config.password = "รหัสผ่าน".to_string();
        assert_eq!(config.masked_password(), "รหั***");
    }

    #[test]
    fn display_url_omits_the_password() {
        let config = CheckConfig::from_lookup(|_| None).unwrap();
        let url = config.display_url();
        assert_eq!(url, "postgresql://stock_app_user@localhost:5432/stock_management");
        assert!(!url.contains(&config.password));
    }
}
