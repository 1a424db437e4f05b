//! Execution of install commands
//!
//! This module provides:
//! - The `InstallRunner` seam used by the orchestrator
//! - A system runner that spawns the package manager and streams its output
//! - Concurrent execution of several commands with an await-all barrier

use crate::domain::{InstallCommand, InstallOutcome, InstallResult};
use crate::error::InstallError;
use crate::output::Console;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Trait for running a single install command
#[async_trait]
pub trait InstallRunner: Send + Sync {
    /// Run `command` in `working_dir` to completion
    async fn run(&self, command: &InstallCommand, working_dir: &Path) -> InstallOutcome;
}

/// Runner that executes real package manager processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    console: Console,
}

impl SystemRunner {
    /// Create a new system runner writing through `console`
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

#[async_trait]
impl InstallRunner for SystemRunner {
    async fn run(&self, command: &InstallCommand, working_dir: &Path) -> InstallOutcome {
        let display = command.to_string();
        let spawned = Command::new(&command.program)
            .args(command.args())
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                let err = InstallError::spawn_failed(display, e);
                self.console.failure(&err.to_string());
                return InstallOutcome::SpawnError {
                    message: err.to_string(),
                };
            }
        };

        self.console
            .notice(&format!("processing install of {}...", command.section));
        self.console.verbose(&format!("$ {}", display));

        let console = self.console;
        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(forward_lines(out, move |line| console.stdout_line(line))));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(forward_lines(err, move |line| console.stderr_line(line))));

        let status = child.wait().await;

        // Drain whatever is still buffered before reporting
        for task in [stdout, stderr].into_iter().flatten() {
            let _ = task.await;
        }

        match status {
            Ok(status) if status.success() => {
                self.console.success(&format!(
                    "install of {} finished successfully.",
                    command.section
                ));
                InstallOutcome::Success
            }
            Ok(status) => {
                let err = InstallError::exit_non_zero(display, status.code());
                self.console
                    .failure(&format!("install of {} failed: {}", command.section, err));
                InstallOutcome::Failed {
                    code: status.code(),
                }
            }
            Err(e) => {
                let err = InstallError::spawn_failed(display, e);
                self.console.failure(&err.to_string());
                InstallOutcome::SpawnError {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Read `reader` line by line and hand each line to `sink`
async fn forward_lines<R, F>(reader: R, sink: F)
where
    R: AsyncRead + Unpin,
    F: Fn(&[u8]),
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => sink(&line),
        }
    }
}

/// Run all commands concurrently and wait for every one of them
///
/// Results come back in the order of `commands`. A failing command never
/// cancels the others.
pub async fn run_installs(
    runner: Arc<dyn InstallRunner>,
    commands: &[InstallCommand],
    working_dir: &Path,
) -> Vec<InstallResult> {
    let handles: Vec<_> = commands
        .iter()
        .cloned()
        .map(|command| {
            let runner = Arc::clone(&runner);
            let working_dir: PathBuf = working_dir.to_path_buf();
            tokio::spawn(async move {
                let outcome = runner.run(&command, &working_dir).await;
                InstallResult::new(command, outcome)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (handle, command) in handles.into_iter().zip(commands) {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => InstallResult::new(
                command.clone(),
                InstallOutcome::SpawnError {
                    message: format!("install task for {} aborted: {}", command.section, e),
                },
            ),
        };
        results.push(result);
    }
    results
}
