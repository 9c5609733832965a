//! Environment Configuration Helpers
//!
//! Small wrappers around `std::env` used by process wiring. Keeping the
//! lookup here gives startup paths one error type instead of a scatter
//! of `expect` calls.

use std::env;
use std::str::FromStr;

/// Error when reading required configuration from the environment
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable not set: {0}")]
    MissingVar(String),
}

/// Read a required environment variable
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

/// Read an optional environment variable with a default
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Read an optional environment variable, if present
pub fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Read and parse an optional environment variable, falling back to the
/// default when unset or unparseable. An unparseable value is a config
/// mistake worth surfacing, so it logs at warn before falling back.
pub fn parse_env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(var = name, value = %raw, "Unparseable value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing() {
        let result = require_env("PLATFORM_TEST_VAR_THAT_DOES_NOT_EXIST");
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_require_env_present() {
        unsafe { env::set_var("PLATFORM_TEST_REQUIRE_PRESENT", "value") };
        assert_eq!(
            require_env("PLATFORM_TEST_REQUIRE_PRESENT").unwrap(),
            "value"
        );
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("PLATFORM_TEST_ENV_OR_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_env_or() {
        unsafe { env::set_var("PLATFORM_TEST_PARSE_OK", "42") };
        assert_eq!(parse_env_or("PLATFORM_TEST_PARSE_OK", 7u32), 42);

        unsafe { env::set_var("PLATFORM_TEST_PARSE_BAD", "not-a-number") };
        assert_eq!(parse_env_or("PLATFORM_TEST_PARSE_BAD", 7u32), 7);

        assert_eq!(parse_env_or("PLATFORM_TEST_PARSE_UNSET", 7u32), 7);
    }
}
