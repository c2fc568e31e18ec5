use std::env;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_DATABASE_POOL_SIZE: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_IN_SECONDS: u64 = 5;
const DEFAULT_INGEST_CRON_PATTERN: &str = "0 0 * * * * *";
const DEFAULT_USER_AGENT: &str = "newsletter_ingest";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} environment variable is not set")]
    MissingVar { name: String },
}

pub struct Config;

impl Config {
    pub fn database_url() -> Result<String, ConfigError> {
        Self::read_var("DATABASE_URL")
    }

    pub fn database_pool_size() -> u32 {
        Self::read_number("DATABASE_POOL_SIZE", DEFAULT_DATABASE_POOL_SIZE)
    }

    pub fn request_timeout_in_seconds() -> u64 {
        Self::read_number(
            "REQUEST_TIMEOUT_IN_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_IN_SECONDS,
        )
    }

    /// Seven-field cron pattern (seconds first) used for scheduled ingestion runs.
    pub fn ingest_cron_pattern() -> String {
        Self::read_var_with_default("INGEST_CRON_PATTERN", DEFAULT_INGEST_CRON_PATTERN)
    }

    pub fn user_agent() -> String {
        Self::read_var_with_default("FEED_USER_AGENT", DEFAULT_USER_AGENT)
    }

    fn read_var(name: &str) -> Result<String, ConfigError> {
        env::var(name).map_err(|_| ConfigError::MissingVar {
            name: name.to_string(),
        })
    }

    fn read_var_with_default(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    fn read_number<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
        match env::var(name) {
            Err(_) => default,
            Ok(value) => match value.trim().parse::<T>() {
                Ok(number) => number,
                Err(_) => {
                    log::warn!("{name} has invalid value {value:?}, using {default}");

                    default
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use super::ConfigError;

    #[test]
    fn read_number_falls_back_to_default_for_garbage() {
        std::env::set_var("NEWSLETTER_INGEST_TEST_NUMBER", "five");

        let result: u32 = Config::read_number("NEWSLETTER_INGEST_TEST_NUMBER", 7);

        assert_eq!(result, 7);
    }

    #[test]
    fn read_number_parses_trimmed_value() {
        std::env::set_var("NEWSLETTER_INGEST_TEST_TIMEOUT", " 12 ");

        let result: u64 = Config::read_number("NEWSLETTER_INGEST_TEST_TIMEOUT", 5);

        assert_eq!(result, 12);
    }

    #[test]
    fn read_var_reports_missing_variable() {
        let result = Config::read_var("NEWSLETTER_INGEST_TEST_MISSING");

        assert_eq!(
            result,
            Err(ConfigError::MissingVar {
                name: "NEWSLETTER_INGEST_TEST_MISSING".to_string()
            })
        );
    }
}
