//! Execution gate

use crate::config::GateConfig;
use liveproof_domain::{meets_threshold, VerificationSession};
use tracing::warn;

/// Outcome of evaluating a session against the gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateDecision {
    /// Session reliability score
    pub score: f64,
    /// `can_execute` as supplied by the service
    pub server_allows: bool,
    /// Whether the score clears the client's threshold
    pub meets_threshold: bool,
}

impl GateDecision {
    /// Whether execute controls may be enabled
    ///
    /// The service flag is authoritative; the client never enables
    /// execution the service did not allow.
    pub fn execute_enabled(&self) -> bool {
        self.server_allows
    }

    /// Whether the service flag and the client threshold agree
    pub fn agrees(&self) -> bool {
        self.server_allows == self.meets_threshold
    }
}

/// Evaluate a session against the gate
pub fn evaluate(session: &VerificationSession, config: &GateConfig) -> GateDecision {
    let decision = GateDecision {
        score: session.reliability_score,
        server_allows: session.can_execute,
        meets_threshold: meets_threshold(session.reliability_score, config.reliability_threshold),
    };

    if !decision.agrees() {
        warn!(
            session_id = %session.session_id,
            score = decision.score,
            threshold = config.reliability_threshold,
            server_allows = decision.server_allows,
            "Execution eligibility disagrees with local threshold"
        );
    }

    decision
}
