//! Server configuration, read from the environment at startup.

pub const DEFAULT_PORT: u16 = 2022;

#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (default `0.0.0.0`).
    pub host: String,
    /// Listener port (default 2022).
    pub port: u16,
    /// sqlx SQLite URL, e.g. `sqlite://todos.db` or `sqlite::memory:`.
    pub database_url: String,
    pub database_max_connections: u32,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: DEFAULT_PORT,
            database_url: "sqlite://todos.db".to_owned(),
            database_max_connections: 5,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from environment variables, keeping the default
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("SERVER_HOST", &defaults.host),
            port: parse_env("SERVER_PORT", defaults.port),
            database_url: env_or("DATABASE_URL", &defaults.database_url),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            log_level: env_or("LOG_LEVEL", &defaults.log_level),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_2022() {
        let config = Config::default();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_owned(), 2022));
        assert_eq!(config.database_url, "sqlite://todos.db");
    }

    #[test]
    fn unset_values_fall_back() {
        assert_eq!(parse_env("TODO_SERVER_TEST_UNSET_PORT", 2022u16), 2022);
    }

    #[test]
    fn unparsable_values_fall_back() {
        std::env::set_var("TODO_SERVER_TEST_BAD_PORT", "abc");
        assert_eq!(parse_env("TODO_SERVER_TEST_BAD_PORT", 2022u16), 2022);

        std::env::set_var("TODO_SERVER_TEST_BIG_PORT", "70000");
        assert_eq!(parse_env("TODO_SERVER_TEST_BIG_PORT", 2022u16), 2022);

        std::env::set_var("TODO_SERVER_TEST_GOOD_PORT", "8080");
        assert_eq!(parse_env("TODO_SERVER_TEST_GOOD_PORT", 2022u16), 8080);
    }
}
