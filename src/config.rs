//! Environment configuration.

use std::env;

/// Log file path; logging stays off when unset.
pub const LOG_FILE_VAR: &str = "UITERM_LOG";
/// `tracing_subscriber` filter directive for the log file.
pub const LOG_FILTER_VAR: &str = "UITERM_LOG_FILTER";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub log_file: Option<String>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_file: env_string_opt(LOG_FILE_VAR),
            log_filter: env_string_opt(LOG_FILTER_VAR),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
