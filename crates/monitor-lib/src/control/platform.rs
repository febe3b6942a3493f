//! Platform-specific signal delivery
//!
//! On unix the errno from `kill(2)` distinguishes a stale pid (ESRCH) from
//! a privilege problem (EPERM), which is exactly the taxonomy the API
//! reports. Elsewhere we go through `sysinfo`, which can only say whether
//! the signal was accepted.

use super::SignalError;
use crate::models::ProcessAction;

#[cfg(unix)]
pub(super) fn send_signal(pid: u32, action: ProcessAction) -> Result<(), SignalError> {
    let signal = match action {
        ProcessAction::Suspend => libc::SIGSTOP,
        ProcessAction::Resume => libc::SIGCONT,
        ProcessAction::Terminate => libc::SIGTERM,
    };

    if pid > i32::MAX as u32 {
        // Cannot be a live pid on any unix; don't let the cast wrap into a
        // negative (process-group) target.
        return Err(SignalError::NotFound(pid));
    }

    let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if rc == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(SignalError::NotFound(pid)),
        Some(libc::EPERM) => Err(SignalError::AccessDenied { pid, action }),
        _ => Err(SignalError::Os(format!(
            "Failed to {action} process {pid}: {err}"
        ))),
    }
}

#[cfg(not(unix))]
pub(super) fn send_signal(pid: u32, action: ProcessAction) -> Result<(), SignalError> {
    use sysinfo::{Pid, ProcessesToUpdate, Signal, System};

    let target = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[target]), true);

    let Some(process) = sys.process(target) else {
        return Err(SignalError::NotFound(pid));
    };

    let signal = match action {
        ProcessAction::Suspend => Signal::Stop,
        ProcessAction::Resume => Signal::Continue,
        ProcessAction::Terminate => Signal::Term,
    };

    match process.kill_with(signal) {
        Some(true) => Ok(()),
        // No errno here; a refused signal to a live process is almost always
        // a privilege problem.
        Some(false) => Err(SignalError::AccessDenied { pid, action }),
        None => Err(SignalError::Os(format!(
            "Signal for {action} not supported on this platform"
        ))),
    }
}
