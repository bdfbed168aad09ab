//! Environment-driven configuration with warn-level logging for invalid values.

use std::fmt;

use crate::constants::SQLITE_POOL_SIZE;

const DB_USER_ENV: &str = "DB_USER";
const DB_PASSWORD_ENV: &str = "DB_PASSWORD";
const DB_HOST_ENV: &str = "DB_HOST";
const DB_PORT_ENV: &str = "DB_PORT";
const DB_NAME_ENV: &str = "DB_NAME";
const SQLITE_POOL_SIZE_ENV: &str = "SALARY_SURVEY_DB_POOL_SIZE";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + fmt::Display>(var: &str, default: T) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a string environment variable, falling back to `default` when unset or empty.
pub fn env_or_default(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_owned(),
    }
}

/// PostgreSQL connection parameters.
///
/// Built once at the edge (`from_env`) and handed explicitly to storage
/// construction; nothing below the binary reads the environment for it.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_owned(),
            password: "postgres".to_owned(),
            host: "localhost".to_owned(),
            port: 5432,
            name: "postgres".to_owned(),
        }
    }
}

impl DbConfig {
    /// Load from `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, `DB_NAME`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user: env_or_default(DB_USER_ENV, &defaults.user),
            password: env_or_default(DB_PASSWORD_ENV, &defaults.password),
            host: env_or_default(DB_HOST_ENV, &defaults.host),
            port: env_parse_with_default(DB_PORT_ENV, defaults.port),
            name: env_or_default(DB_NAME_ENV, &defaults.name),
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

/// SQLite pool size from `SALARY_SURVEY_DB_POOL_SIZE`.
pub fn sqlite_pool_size() -> u32 {
    env_parse_with_default(SQLITE_POOL_SIZE_ENV, SQLITE_POOL_SIZE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_ENV_PARSE_VALID_98271";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_ENV_PARSE_INVALID_98272";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 5432);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_ENV_PARSE_MISSING_98273";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_or_default_blank_value() {
        let var_name = "TEST_ENV_OR_DEFAULT_BLANK_98274";
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(env_or_default(var_name, "localhost"), "localhost");
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_defaults() {
        let config = DbConfig::default();
        assert_eq!((config.host.as_str(), config.port), ("localhost", 5432));
        assert_eq!((config.user.as_str(), config.name.as_str()), ("postgres", "postgres"));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = DbConfig { password: "hunter2".to_owned(), ..DbConfig::default() };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
