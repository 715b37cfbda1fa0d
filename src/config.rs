use std::env;

/// Runtime configuration, read from the environment with sensible defaults.
///
/// The only tunable today is the simulated latency applied by the in-memory
/// collections, 200-500 ms per call by default.
#[derive(Clone, Debug)]
pub struct Config {
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            latency_min_ms: env::var("MOCK_LATENCY_MIN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            latency_max_ms: env::var("MOCK_LATENCY_MAX_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
        }
    }

    /// Zero-latency configuration for tests, so suites never sleep.
    pub fn test_config() -> Self {
        Self {
            latency_min_ms: 0,
            latency_max_ms: 0,
        }
    }

    pub fn latency(&self) -> crate::repositories::Latency {
        crate::repositories::Latency::new(self.latency_min_ms, self.latency_max_ms)
    }
}
