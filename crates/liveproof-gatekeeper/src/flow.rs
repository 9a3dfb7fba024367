//! Verification flow state machine
//!
//! One owned structure holds the displayed session, its gate decision, the
//! per-action execution status and the most recent artifact. Every
//! transition goes through a begin/complete pair so the in-flight rules hold
//! whether the caller awaits inline or runs actions concurrently.
//!
//! ```text
//! NoSession -> Verifying -> Answered                 (service disallows)
//!                        -> Executable -> action: Executing -> Executed | Failed
//! ```

use crate::backend::VerificationBackend;
use crate::config::GateConfig;
use crate::error::{FlowError, GateError};
use crate::gate::{evaluate, GateDecision};
use liveproof_domain::{ActionType, ExecutionResult, VerificationSession, VerifyRequest};
use liveproof_sdk::SdkError;
use tracing::{debug, info};

/// Overall state of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing verified yet (or the last verify failed)
    NoSession,
    /// A verify call is outstanding
    Verifying,
    /// Session displayed; execution not permitted
    Answered,
    /// Session displayed; execution permitted
    Executable,
}

/// Execution status of one action type for the displayed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStatus {
    /// Not triggered
    Idle,
    /// Request outstanding; the trigger is disabled
    Executing,
    /// Last request succeeded
    Executed,
    /// Last request failed with this message
    Failed(String),
}

/// Identifies the session a control was rendered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    generation: u64,
    session_id: String,
}

impl SessionHandle {
    /// Server-assigned session id
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Proof of an outstanding verify call
#[derive(Debug)]
#[must_use = "complete or abandon the verification"]
pub struct VerifyTicket {
    generation: u64,
}

/// Proof of an outstanding execute call
#[derive(Debug)]
#[must_use = "complete the execution"]
pub struct ExecuteTicket {
    generation: u64,
    session_id: String,
    action: ActionType,
}

impl ExecuteTicket {
    /// Session the request targets
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Requested action
    pub fn action(&self) -> ActionType {
        self.action
    }
}

struct ActiveSession {
    session: VerificationSession,
    decision: GateDecision,
    actions: [ActionStatus; 3],
    artifact: Option<(ActionType, ExecutionResult)>,
}

/// Client-side state for one verify → execute interaction
pub struct VerificationFlow {
    config: GateConfig,
    generation: u64,
    verifying: bool,
    active: Option<ActiveSession>,
    last_error: Option<String>,
}

impl VerificationFlow {
    /// Create an empty flow
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            generation: 0,
            verifying: false,
            active: None,
            last_error: None,
        }
    }

    /// Gate configuration in use
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> FlowState {
        if self.verifying {
            return FlowState::Verifying;
        }
        match &self.active {
            None => FlowState::NoSession,
            Some(active) if active.decision.execute_enabled() => FlowState::Executable,
            Some(_) => FlowState::Answered,
        }
    }

    /// Displayed session
    pub fn session(&self) -> Option<&VerificationSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Gate decision for the displayed session
    pub fn decision(&self) -> Option<&GateDecision> {
        self.active.as_ref().map(|a| &a.decision)
    }

    /// Handle for the displayed session
    pub fn handle(&self) -> Option<SessionHandle> {
        self.active.as_ref().map(|a| SessionHandle {
            generation: self.generation,
            session_id: a.session.session_id.clone(),
        })
    }

    /// Status of an action for the displayed session
    pub fn action_status(&self, action: ActionType) -> ActionStatus {
        self.active
            .as_ref()
            .map(|a| a.actions[action.index()].clone())
            .unwrap_or(ActionStatus::Idle)
    }

    /// Most recent artifact for the displayed session
    pub fn artifact(&self) -> Option<(ActionType, &ExecutionResult)> {
        self.active
            .as_ref()
            .and_then(|a| a.artifact.as_ref())
            .map(|(action, result)| (*action, result))
    }

    /// Message of the most recent failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the trigger for `action` should be enabled
    pub fn can_trigger(&self, handle: &SessionHandle, action: ActionType) -> bool {
        self.check_execute(handle, action).is_ok()
    }

    /// Start a verification, clearing the displayed session and artifact
    pub fn begin_verify(&mut self) -> Result<VerifyTicket, GateError> {
        if self.verifying {
            return Err(GateError::VerifyInFlight);
        }

        self.generation += 1;
        self.verifying = true;
        self.active = None;
        self.last_error = None;
        debug!(generation = self.generation, "Verification started");

        Ok(VerifyTicket {
            generation: self.generation,
        })
    }

    /// Finish a verification with the transport outcome
    pub fn complete_verify(
        &mut self,
        ticket: VerifyTicket,
        outcome: Result<VerificationSession, SdkError>,
    ) -> Result<SessionHandle, FlowError> {
        if !self.verifying || ticket.generation != self.generation {
            return Err(GateError::StaleTicket.into());
        }
        self.verifying = false;

        let session = match outcome {
            Ok(session) => session,
            Err(e) => {
                self.last_error = Some(e.message().to_string());
                return Err(e.into());
            }
        };

        let decision = evaluate(&session, &self.config);
        info!(
            session_id = %session.session_id,
            score = session.reliability_score,
            execute_enabled = decision.execute_enabled(),
            "Session verified"
        );

        let handle = SessionHandle {
            generation: self.generation,
            session_id: session.session_id.clone(),
        };
        self.active = Some(ActiveSession {
            session,
            decision,
            actions: [ActionStatus::Idle, ActionStatus::Idle, ActionStatus::Idle],
            artifact: None,
        });

        Ok(handle)
    }

    /// Give up on an outstanding verification
    pub fn abandon_verify(&mut self, ticket: VerifyTicket) {
        if self.verifying && ticket.generation == self.generation {
            self.verifying = false;
            debug!(generation = self.generation, "Verification abandoned");
        }
    }

    /// Start executing `action` for the session `handle` was rendered for
    pub fn begin_execute(
        &mut self,
        handle: &SessionHandle,
        action: ActionType,
    ) -> Result<ExecuteTicket, GateError> {
        self.check_execute(handle, action)?;

        let generation = self.generation;
        let active = self.active.as_mut().ok_or(GateError::NoSession)?;
        active.actions[action.index()] = ActionStatus::Executing;
        active.artifact = None;
        self.last_error = None;
        debug!(session_id = %handle.session_id, action = %action, "Execution started");

        Ok(ExecuteTicket {
            generation,
            session_id: handle.session_id.clone(),
            action,
        })
    }

    /// Finish an execution with the transport outcome
    ///
    /// Outcomes for a session that has since been replaced are discarded.
    pub fn complete_execute(
        &mut self,
        ticket: ExecuteTicket,
        outcome: Result<ExecutionResult, SdkError>,
    ) -> Result<ExecutionResult, FlowError> {
        let active = match self.active.as_mut() {
            Some(active) if ticket.generation == self.generation => active,
            _ => {
                debug!(session_id = %ticket.session_id, "Discarding result for replaced session");
                return Err(GateError::StaleSession(ticket.session_id).into());
            }
        };

        match outcome {
            Ok(result) => {
                active.actions[ticket.action.index()] = ActionStatus::Executed;
                active.artifact = Some((ticket.action, result.clone()));
                Ok(result)
            }
            Err(e) => {
                let message = e.message().to_string();
                active.actions[ticket.action.index()] = ActionStatus::Failed(message.clone());
                self.last_error = Some(message);
                Err(e.into())
            }
        }
    }

    /// Verify through `backend`, replacing the displayed session
    pub async fn verify<B: VerificationBackend>(
        &mut self,
        backend: &B,
        request: VerifyRequest,
    ) -> Result<SessionHandle, FlowError> {
        let ticket = self.begin_verify()?;
        let outcome = backend.verify(&request).await;
        self.complete_verify(ticket, outcome)
    }

    /// Execute `action` through `backend` for the session `handle` names
    pub async fn execute<B: VerificationBackend>(
        &mut self,
        backend: &B,
        handle: &SessionHandle,
        action: ActionType,
    ) -> Result<ExecutionResult, FlowError> {
        let ticket = self.begin_execute(handle, action)?;
        let outcome = backend.execute(ticket.session_id(), action).await;
        self.complete_execute(ticket, outcome)
    }

    fn check_execute(&self, handle: &SessionHandle, action: ActionType) -> Result<(), GateError> {
        if handle.generation != self.generation {
            return Err(GateError::StaleSession(handle.session_id.clone()));
        }
        let active = self.active.as_ref().ok_or(GateError::NoSession)?;
        if !active.decision.execute_enabled() {
            return Err(GateError::ExecutionNotPermitted {
                score: active.decision.score,
            });
        }
        if active.actions[action.index()] == ActionStatus::Executing {
            return Err(GateError::ActionInFlight(action));
        }
        Ok(())
    }
}
