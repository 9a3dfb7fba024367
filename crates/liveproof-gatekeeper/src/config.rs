//! Gatekeeper configuration

use liveproof_domain::RELIABILITY_THRESHOLD;

/// Configuration for the execution gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    /// Score at which the client expects the service to allow execution
    pub reliability_threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            reliability_threshold: RELIABILITY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_shared_threshold() {
        let config = GateConfig::default();
        assert_eq!(config.reliability_threshold, 0.65);
        assert_eq!(config.reliability_threshold, RELIABILITY_THRESHOLD);
    }
}
