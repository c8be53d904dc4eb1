//! Engine configuration.

use ordsched_core::env::env_get;
use ordsched_core::UNLIMITED;

/// Configuration for a session spawned via [`crate::scheduler::spawn_session`]
/// (`ordsched::QueueScheduler` at the façade level).
///
/// Use [`EngineConfig::from_env`] to start from defaults with environment
/// overrides, or build one directly with the setter methods.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Cap on the input queue. `0` ([`UNLIMITED`]) means no cap — the
    /// feeder never blocks on push.
    pub max_input_size: usize,
    /// Cap on the output queue. `0` ([`UNLIMITED`]) means no cap.
    pub max_output_size: usize,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self { max_input_size: UNLIMITED, max_output_size: UNLIMITED }
    }

    /// Start from compile-time defaults with environment overrides.
    ///
    /// - `ORDSCHED_MAX_INPUT_SIZE` — overrides `max_input_size`.
    /// - `ORDSCHED_MAX_OUTPUT_SIZE` — overrides `max_output_size`.
    pub fn from_env() -> Self {
        Self {
            max_input_size: env_get("ORDSCHED_MAX_INPUT_SIZE", UNLIMITED),
            max_output_size: env_get("ORDSCHED_MAX_OUTPUT_SIZE", UNLIMITED),
        }
    }

    pub fn max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    pub fn max_output_size(mut self, size: usize) -> Self {
        self.max_output_size = size;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unlimited() {
        let cfg = EngineConfig::new();
        assert_eq!(cfg.max_input_size, UNLIMITED);
        assert_eq!(cfg.max_output_size, UNLIMITED);
    }

    #[test]
    fn builder_overrides_fields() {
        let cfg = EngineConfig::new().max_input_size(4).max_output_size(8);
        assert_eq!(cfg.max_input_size, 4);
        assert_eq!(cfg.max_output_size, 8);
    }

    #[test]
    fn from_env_reads_overrides() {
        std::env::set_var("ORDSCHED_MAX_INPUT_SIZE", "5");
        let cfg = EngineConfig::from_env();
        assert_eq!(cfg.max_input_size, 5);
        std::env::remove_var("ORDSCHED_MAX_INPUT_SIZE");
    }
}
