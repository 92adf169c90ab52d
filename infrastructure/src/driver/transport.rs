//! Driver process transport.
//!
//! One driver process per exchange: spawn the CLI with the prompt and
//! resume arguments, read newline-delimited JSON events from stdout, and
//! reap the child when the exchange finishes or is aborted. An abort
//! gives the child a bounded grace period before it is killed, and no
//! further events are consumed.

use crate::driver::error::{DriverError, Result};
use crate::driver::protocol::{parse_event, DriverEvent};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Arguments for one driver exchange.
#[derive(Debug, Clone)]
pub struct DriverInvocation {
    /// Driver executable name or path.
    pub command: String,
    /// The new user prompt for this exchange.
    pub prompt: String,
    /// System instruction for the exchange; empty means driver default.
    pub system_prompt: String,
    /// Cap on the driver's internal reasoning turns.
    pub max_turns: u32,
    /// Provider session identifier to resume, if any.
    pub resume: Option<String>,
}

/// A running driver process for one exchange.
pub struct DriverProcess {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    cancel: CancellationToken,
    abort_grace: Duration,
}

impl DriverProcess {
    /// Spawn the driver CLI for one exchange.
    pub fn spawn(
        invocation: &DriverInvocation,
        cancel: CancellationToken,
        abort_grace: Duration,
    ) -> Result<Self> {
        let mut command = Command::new(&invocation.command);
        command
            .arg("--print")
            .arg("--output-format")
            .arg("stream-json")
            .arg("--verbose")
            .arg("--max-turns")
            .arg(invocation.max_turns.to_string());

        if !invocation.system_prompt.is_empty() {
            command.arg("--system-prompt").arg(&invocation.system_prompt);
        }

        if let Some(ref resume) = invocation.resume {
            command.arg("--resume").arg(resume);
        }

        command
            .arg(&invocation.prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(command = %invocation.command, resume = invocation.resume.is_some(), "Spawning driver");

        let mut child = command.spawn()?;
        let stdout = child.stdout.take().ok_or_else(|| {
            DriverError::SpawnError(std::io::Error::other("driver stdout not captured"))
        })?;

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
            cancel,
            abort_grace,
        })
    }

    /// Read the next event, skipping blank lines.
    ///
    /// Returns `Ok(None)` at end of stream and `Err(Aborted)` once the
    /// cancellation token fires.
    pub async fn next_event(&mut self) -> Result<Option<DriverEvent>> {
        loop {
            let line = tokio::select! {
                _ = self.cancel.cancelled() => {
                    self.abort().await;
                    return Err(DriverError::Aborted);
                }
                line = self.lines.next_line() => line?,
            };

            match line {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return parse_event(&line).map(Some),
            }
        }
    }

    /// Reap a finished child, reporting early exits.
    pub async fn finish(mut self) -> Result<()> {
        let status = self.child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(DriverError::EarlyExit {
                status: status.to_string(),
            })
        }
    }

    /// Give the child a bounded grace period, then kill it.
    async fn abort(&mut self) {
        warn!("Aborting driver exchange");
        let wait = tokio::time::timeout(self.abort_grace, self.child.wait()).await;
        if wait.is_err() {
            if let Err(e) = self.child.kill().await {
                warn!("Failed to kill driver process: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::protocol::DriverEvent;

    /// Spawn `sh -c <script>` directly, bypassing the CLI argument shape.
    fn spawn_script(script: &str) -> DriverProcess {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        let mut child = command.spawn().unwrap();
        let stdout = child.stdout.take().unwrap();
        DriverProcess {
            child,
            lines: BufReader::new(stdout).lines(),
            cancel: CancellationToken::new(),
            abort_grace: Duration::from_millis(100),
        }
    }

    #[tokio::test]
    async fn reads_events_and_skips_blank_lines() {
        let mut process = spawn_script(
            r#"printf '{"type":"system","subtype":"init","session_id":"s1"}\n\n{"type":"result","subtype":"success"}\n'"#,
        );

        let first = process.next_event().await.unwrap().unwrap();
        assert!(matches!(first, DriverEvent::System(_)));

        let second = process.next_event().await.unwrap().unwrap();
        assert!(matches!(second, DriverEvent::Result(_)));

        assert!(process.next_event().await.unwrap().is_none());
        process.finish().await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_is_reported() {
        let mut process = spawn_script("exit 3");
        assert!(process.next_event().await.unwrap().is_none());
        let err = process.finish().await.unwrap_err();
        assert!(matches!(err, DriverError::EarlyExit { .. }));
    }

    #[tokio::test]
    async fn cancellation_aborts_the_exchange() {
        let cancel = CancellationToken::new();
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg("sleep 30")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        let mut child = command.spawn().unwrap();
        let stdout = child.stdout.take().unwrap();
        let mut process = DriverProcess {
            child,
            lines: BufReader::new(stdout).lines(),
            cancel: cancel.clone(),
            abort_grace: Duration::from_millis(50),
        };

        cancel.cancel();
        let err = process.next_event().await.unwrap_err();
        assert!(matches!(err, DriverError::Aborted));
    }
}
