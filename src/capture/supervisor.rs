//! Deadline-bounded process supervision.
//!
//! Runs one external command with stdout and stderr captured, polling for
//! exit until the deadline. On Unix the child leads its own process group so
//! a timeout also takes down anything it spawned (e.g. a headless browser).

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Interval between exit checks.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output readers may lag behind process exit. Grandchildren that
/// inherited the pipes can keep them open indefinitely.
const READER_GRACE: Duration = Duration::from_secs(2);

/// Exit code, combined output and duration of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; negative signal number when killed by a signal.
    pub exit_code: i32,
    /// Captured stdout followed by captured stderr.
    pub output: Vec<u8>,
    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
}

/// Ways a supervised run can end without a normal outcome.
#[derive(Debug, Error)]
pub enum RunFault {
    /// The process could not be started (missing binary, not executable).
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The deadline elapsed and the process group was killed.
    #[error("'{program}' did not finish within {}s", .timeout.as_secs_f64())]
    TimedOut {
        program: String,
        timeout: Duration,
        partial: ProcessOutcome,
    },

    /// The process status could not be read.
    #[error("lost track of '{program}': {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },
}

/// Run `argv` in `cwd` with no stdin, killing it after `timeout`.
///
/// A non-zero exit is returned as a normal [`ProcessOutcome`].
pub fn run(argv: &[String], cwd: &Path, timeout: Duration) -> Result<ProcessOutcome, RunFault> {
    let Some((program, args)) = argv.split_first() else {
        return Err(RunFault::Launch {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let start = Instant::now();
    let mut child = command.spawn().map_err(|source| RunFault::Launch {
        program: program.clone(),
        source,
    })?;
    debug!(pid = child.id(), program = %program, "spawned");

    let stdout = OutputReader::spawn(child.stdout.take());
    let stderr = OutputReader::spawn(child.stderr.take());

    let waited = wait_with_timeout(&mut child, timeout);
    let duration = start.elapsed();

    let status = match waited {
        Ok(status) => status,
        Err(source) => {
            kill_process_group(&mut child);
            return Err(RunFault::Io {
                program: program.clone(),
                source,
            });
        }
    };

    let mut output = stdout.collect(READER_GRACE);
    output.extend(stderr.collect(READER_GRACE));

    match status {
        Some(status) => Ok(ProcessOutcome {
            exit_code: exit_code_of(status),
            output,
            duration,
        }),
        None => {
            warn!(
                program = %program,
                timeout_secs = timeout.as_secs_f64(),
                "deadline exceeded, process group killed"
            );
            Err(RunFault::TimedOut {
                program: program.clone(),
                timeout,
                partial: ProcessOutcome {
                    exit_code: SIGKILL_EXIT_CODE,
                    output,
                    duration,
                },
            })
        }
    }
}

/// Exit code recorded for a process killed at the deadline.
#[cfg(unix)]
const SIGKILL_EXIT_CODE: i32 = -9;
#[cfg(not(unix))]
const SIGKILL_EXIT_CODE: i32 = -1;

/// Wait for a child process with timeout.
///
/// Returns `Some(status)` on exit, `None` if the deadline elapsed (the
/// process group has been killed and reaped by then).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            kill_process_group(child);
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL.min(timeout.saturating_sub(start.elapsed())));
    }
}

/// Kill the child's whole process group, then the child itself, and reap it.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Ok(pgid) = i32::try_from(child.id()) {
            let _ = killpg(Pid::from_raw(pgid), Signal::SIGKILL);
        }
    }

    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// Drains one pipe on a background thread into a shared buffer, so partial
/// output stays available even if the pipe never closes.
struct OutputReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl OutputReader {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();

        if let Some(mut pipe) = pipe {
            let sink = Arc::clone(&buffer);
            std::thread::spawn(move || {
                let mut chunk = [0u8; 8192];
                loop {
                    match pipe.read(&mut chunk) {
                        Ok(0) => break,
                        Ok(n) => sink
                            .lock()
                            .unwrap_or_else(|poison| poison.into_inner())
                            .extend_from_slice(&chunk[..n]),
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(_) => break,
                    }
                }
                let _ = tx.send(());
            });
        }

        Self { buffer, done }
    }

    /// Wait up to `grace` for EOF, then take whatever has been read.
    fn collect(self, grace: Duration) -> Vec<u8> {
        let _ = self.done.recv_timeout(grace);
        std::mem::take(
            &mut *self
                .buffer
                .lock()
                .unwrap_or_else(|poison| poison.into_inner()),
        )
    }
}
