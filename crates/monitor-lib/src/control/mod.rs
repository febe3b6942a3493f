//! Process lifecycle control
//!
//! Sends suspend/resume/terminate signals to a process by pid and reports
//! whether the OS accepted the signal. Termination is advisory: SIGTERM
//! asks the process to exit, it does not wait for it to die. No operation
//! is retried and none waits for the target to change state.

mod platform;


use crate::models::{ActionOutcome, ProcessAction, ProcessActionResult};
use thiserror::Error;

/// Why a signal was not delivered.
///
/// Carried as a value through the controller instead of unwinding; the API
/// edge turns it into an outcome plus HTTP status.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Process {0} not found")]
    NotFound(u32),
    #[error("Access denied to {action} process {pid}")]
    AccessDenied { pid: u32, action: ProcessAction },
    #[error("{0}")]
    Os(String),
}

/// Trait for process controllers
///
/// Seam for the HTTP layer; tests substitute a stub so they never signal
/// real processes.
pub trait ProcessControl: Send + Sync {
    fn suspend(&self, pid: u32) -> ProcessActionResult;
    fn resume(&self, pid: u32) -> ProcessActionResult;
    fn terminate(&self, pid: u32) -> ProcessActionResult;
}

/// Controller backed by OS signals.
///
/// Stateless: each call looks the process up and submits one signal. A
/// resume after a failed suspend is just another SIGCONT; there is no
/// controller-side state to reconcile.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalController;

impl SignalController {
    pub fn new() -> Self {
        Self
    }

    fn act(&self, pid: u32, action: ProcessAction) -> ProcessActionResult {
        // pid 0 addresses the caller's own process group at the OS level;
        // it never names a single live process here.
        let sent = if pid == 0 {
            Err(SignalError::NotFound(pid))
        } else {
            platform::send_signal(pid, action)
        };

        let result = match sent {
            Ok(()) => ProcessActionResult {
                pid,
                action,
                outcome: ActionOutcome::Success,
                message: format!("Process {pid} {}", action.past_tense()),
            },
            Err(err) => ProcessActionResult {
                pid,
                action,
                outcome: outcome_for(&err),
                message: err.to_string(),
            },
        };

        tracing::info!(
            pid = result.pid,
            action = %result.action,
            outcome = ?result.outcome,
            "Process control action"
        );

        result
    }
}

fn outcome_for(err: &SignalError) -> ActionOutcome {
    match err {
        SignalError::NotFound(_) => ActionOutcome::NotFound,
        SignalError::AccessDenied { .. } => ActionOutcome::AccessDenied,
        SignalError::Os(_) => ActionOutcome::OtherError,
    }
}

impl ProcessControl for SignalController {
    fn suspend(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Suspend)
    }

    fn resume(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Resume)
    }

    fn terminate(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Terminate)
    }
}
