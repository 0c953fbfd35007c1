use std::time::Duration;

use crate::config::TransportSettings;

/// Timeouts applied by the HTTP transport.
///
/// An elapsed timeout surfaces as a network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from(&TransportSettings::default())
    }
}

impl From<&TransportSettings> for TimeoutConfig {
    fn from(settings: &TransportSettings) -> Self {
        Self {
            connect: Duration::from_secs(settings.connect_timeout_seconds as u64),
            request: Duration::from_secs(settings.timeout_seconds as u64),
        }
    }
}
