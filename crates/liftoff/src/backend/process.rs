//! Child process transport
//!
//! Every action is one short-lived child process: write the request, close
//! stdin, collect stdout, and forward stderr line by line while the child runs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use liftoff_core::config::BackendConfig;
use liftoff_core::{DiagnosticSink, LiftoffError, Result};

use super::protocol::{parse_diagnostic_line, Action, BackendRequest, BackendResponse};

/// How to launch a backend or extension executable
#[derive(Debug, Clone)]
pub struct BackendProcess {
    command: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    project_path: PathBuf,
}

impl BackendProcess {
    pub fn new(command: impl Into<PathBuf>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
            project_path: project_path.into(),
        }
    }

    /// Build from the `[backend]` table of `liftoff.toml`
    pub fn from_config(config: &BackendConfig, project_path: &Path) -> Self {
        let mut process =
            Self::new(&config.command, project_path).with_args(config.args.clone());
        process.working_dir = config.working_dir.as_ref().map(|dir| project_path.join(dir));
        process
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Run one action and return its output value.
    ///
    /// When `diagnostics` is given, JSON events on stderr are delivered to it
    /// before this returns. Other stderr lines are logged at debug level.
    #[instrument(skip(self, input, diagnostics), fields(command = %self.command.display()))]
    pub async fn call(
        &self,
        action: Action,
        input: serde_json::Value,
        diagnostics: Option<DiagnosticSink>,
    ) -> Result<serde_json::Value> {
        let request = BackendRequest {
            action,
            project_path: self.project_path.clone(),
            input,
        };
        let request_json = serde_json::to_vec(&request)?;

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            LiftoffError::backend(
                action.as_str(),
                format!("failed to spawn {}: {e}", self.command.display()),
            )
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LiftoffError::protocol("backend stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| LiftoffError::protocol("backend stderr was not captured"))?;

        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let mut reader = BufReader::new(stdout);
            reader.read_to_end(&mut buf).await.map(|_| buf)
        });
        let stderr_task = tokio::spawn(forward_stderr(stderr, diagnostics));

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&request_json).await.map_err(|e| {
                LiftoffError::backend(action.as_str(), format!("failed to write request: {e}"))
            })?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        let stdout = stdout_task
            .await
            .map_err(|e| LiftoffError::protocol(format!("stdout reader failed: {e}")))??;
        // Events must all be delivered before the caller detaches its monitor
        stderr_task
            .await
            .map_err(|e| LiftoffError::protocol(format!("stderr reader failed: {e}")))?;

        debug!(action = %action, status = %status, bytes = stdout.len(), "backend call finished");

        let response = parse_response(&stdout);
        match response {
            Ok(BackendResponse {
                error: Some(error), ..
            }) => Err(LiftoffError::backend(action.as_str(), error)),
            Ok(response) if status.success() => {
                Ok(response.output.unwrap_or(serde_json::Value::Null))
            }
            Ok(_) => Err(LiftoffError::backend(
                action.as_str(),
                format!("process exited with {status}"),
            )),
            Err(e) if status.success() => Err(e),
            Err(_) => Err(LiftoffError::backend(
                action.as_str(),
                format!("process exited with {status}"),
            )),
        }
    }
}

fn parse_response(stdout: &[u8]) -> Result<BackendResponse> {
    let text = String::from_utf8_lossy(stdout);
    // Engines print banners before our payload; the response is the last line
    let payload = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| LiftoffError::protocol("backend wrote no response"))?;
    serde_json::from_str(payload)
        .map_err(|e| LiftoffError::protocol(format!("invalid backend response: {e}")))
}

/// Drain stderr until EOF.
///
/// Lines are decoded lossily. Only EOF or a read error ends the drain.
async fn forward_stderr(stderr: tokio::process::ChildStderr, diagnostics: Option<DiagnosticSink>) {
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']);
                match (parse_diagnostic_line(line), diagnostics.as_ref()) {
                    (Some(event), Some(sink)) => sink.emit(&event),
                    _ => debug!(target: "liftoff::backend::stderr", "{line}"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to read backend stderr");
                break;
            }
        }
    }
}
