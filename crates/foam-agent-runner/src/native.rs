use crate::error::RunnerError;
use std::io;
use std::process::{Output, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::{CommandSpec, ProcessOutput, ProcessRunner};

const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);

// ============================================================================
// NativeRunner
// ============================================================================

/// Runs a [`CommandSpec`] with `std::process` and a thread-based timeout.
///
/// A helper thread owns the child and blocks in `wait_with_output`, which
/// drains both pipes so a chatty solver cannot deadlock on a full buffer.
/// The calling thread waits on a channel with the deadline.
///
/// On timeout the child's process group gets SIGTERM, then SIGKILL once
/// `kill_grace` has passed without the group exiting. On Windows the process
/// is terminated directly.
#[derive(Debug, Clone, Copy)]
pub struct NativeRunner {
    kill_grace: Duration,
}

impl Default for NativeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }

    /// Time allowed between SIGTERM and SIGKILL after a timeout.
    #[must_use]
    pub const fn with_kill_grace(mut self, kill_grace: Duration) -> Self {
        self.kill_grace = kill_grace;
        self
    }

    #[must_use]
    pub const fn kill_grace(&self) -> Duration {
        self.kill_grace
    }
}

impl ProcessRunner for NativeRunner {
    fn run(
        &self,
        cmd: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError> {
        let program = cmd.program_display();
        if program.is_empty() {
            return Err(RunnerError::InvalidCommand {
                reason: "program is empty".to_string(),
            });
        }

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|e| RunnerError::LaunchFailed {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        let child_id = child.id();
        let started = Instant::now();
        tracing::debug!(program = %program, pid = child_id, ?timeout, "Spawned process");

        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        let received = match timeout {
            Some(limit) => rx.recv_timeout(limit),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(output_result) => {
                let _ = handle.join();
                let output = output_result.map_err(|e| RunnerError::WaitFailed {
                    reason: e.to_string(),
                })?;

                tracing::debug!(
                    program = %program,
                    exit_code = ?output.status.code(),
                    duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Process exited"
                );

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                    false,
                ))
            }
            Err(RecvTimeoutError::Timeout) => {
                let limit = timeout.unwrap_or_default();
                tracing::warn!(
                    program = %program,
                    pid = child_id,
                    timeout_secs = limit.as_secs_f64(),
                    "Process timed out; terminating"
                );

                let partial = self.terminate(child_id, &rx);
                if partial.is_some() {
                    let _ = handle.join();
                }
                // Otherwise something outside the process group still holds the
                // pipes open; the waiter thread is left detached.

                let partial_log = partial
                    .map(|out| {
                        ProcessOutput::new(out.stdout, out.stderr, out.status.code(), true)
                            .combined_log()
                    })
                    .unwrap_or_default();

                Err(RunnerError::Timeout {
                    timeout: limit,
                    partial_log,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                Err(RunnerError::WaitFailed {
                    reason: "process monitoring thread terminated unexpectedly".to_string(),
                })
            }
        }
    }
}

impl NativeRunner {
    /// Stop a timed-out child and collect whatever output it produced.
    fn terminate(&self, pid: u32, rx: &Receiver<io::Result<Output>>) -> Option<Output> {
        #[cfg(unix)]
        {
            use nix::sys::signal::Signal;

            signal_group(pid, Signal::SIGTERM);
            if let Ok(result) = rx.recv_timeout(self.kill_grace) {
                return result.ok();
            }
            signal_group(pid, Signal::SIGKILL);
        }

        #[cfg(windows)]
        {
            terminate_windows(pid);
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = pid;
        }

        rx.recv_timeout(self.kill_grace).ok().and_then(Result::ok)
    }
}

#[cfg(unix)]
fn signal_group(pid: u32, signal: nix::sys::signal::Signal) {
    use nix::sys::signal::killpg;
    use nix::unistd::Pid;

    // The child was spawned as its own group leader, so pgid == pid.
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(raw), signal) {
        tracing::debug!(pid, ?signal, error = %e, "killpg failed");
    }
}

#[cfg(windows)]
fn terminate_windows(pid: u32) {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

    unsafe {
        if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
            let _ = TerminateProcess(handle, 1);
            let _ = CloseHandle(handle);
        }
    }
}
