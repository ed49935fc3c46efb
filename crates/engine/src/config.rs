//! Engine configuration.

use std::time::Duration;

use graffiti_core::Limits;

/// Recognized configuration keys and their effects.
#[derive(Debug, Clone)]
pub struct GraffitiConfig {
    /// Logical database name. Cosmetic only — not used as a storage path
    /// by the in-memory backend, but carried for parity with a future
    /// durable backend that would use it to namespace on-disk state.
    pub backend_name: String,
    /// Minimum delay between successive `continue` calls on the same
    /// engine instance.
    pub continue_buffer: Duration,
    /// Size limits enforced on every `post` — an ambient addition that
    /// ships with generous defaults.
    pub limits: Limits,
}

impl Default for GraffitiConfig {
    fn default() -> Self {
        GraffitiConfig {
            backend_name: "graffitiDb".to_string(),
            continue_buffer: Duration::from_millis(2000),
            limits: Limits::default(),
        }
    }
}

impl GraffitiConfig {
    /// Start building a config from defaults.
    pub fn builder() -> GraffitiConfig {
        GraffitiConfig::default()
    }

    /// Set the logical backend name.
    pub fn with_backend_name(mut self, name: impl Into<String>) -> Self {
        self.backend_name = name.into();
        self
    }

    /// Set the minimum delay between continuations.
    pub fn with_continue_buffer(mut self, buffer: Duration) -> Self {
        self.continue_buffer = buffer;
        self
    }

    /// Set the size limits enforced on `post`.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// A config tuned for tests: no rate-limit delay so `continue` tests
    /// don't need to sleep.
    pub fn for_testing() -> Self {
        GraffitiConfig {
            backend_name: "graffitiDb-test".to_string(),
            continue_buffer: Duration::from_millis(0),
            limits: Limits::default(),
        }
    }
}
