use std::env;
use std::time::Duration;

use business::application::shared::deadline::DEFAULT_GATEWAY_TIMEOUT;

/// Upper bound on any single session operation against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConfig {
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Environment variables:
    /// - GATEWAY_TIMEOUT_SECS: Seconds before an operation gives up (default: 10)
    pub fn from_env() -> Self {
        Self::from_value(env::var("GATEWAY_TIMEOUT_SECS").ok())
    }

    fn from_value(raw: Option<String>) -> Self {
        let timeout = raw
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GATEWAY_TIMEOUT);
        Self { timeout }
    }
}
