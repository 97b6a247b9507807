use std::time::Duration;

pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the validation timeout, in milliseconds.
pub const VALIDATION_TIMEOUT_VAR: &str = "WEIQI_VALIDATION_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// How long a move may wait on the authority before it is rolled back.
    pub validation_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let validation_timeout = match lookup(VALIDATION_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!("ignoring invalid {VALIDATION_TIMEOUT_VAR}={raw:?}");
                    DEFAULT_VALIDATION_TIMEOUT
                }
            },
            None => DEFAULT_VALIDATION_TIMEOUT,
        };

        ClientConfig { validation_timeout }
    }
}
