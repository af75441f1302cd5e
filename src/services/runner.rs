use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc::Sender;

use crate::core::choices::UserChoices;
use crate::core::config::{ResolvedConfig, StepConfig};
use crate::core::plan::InstallStep;

/// Lines of stderr kept for the failure message.
const ERROR_TAIL_LINES: usize = 5;

/// Errors that can occur while running a step.
#[derive(Debug)]
pub enum StepError {
    /// The command could not be started at all.
    Spawn(String),
    /// The command ran and exited unsuccessfully. `status` is `None` when it
    /// was killed by a signal.
    Failed { status: Option<i32>, output: String },
    /// Waiting on the command failed.
    Io(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Spawn(msg) => write!(f, "could not start command: {msg}"),
            StepError::Failed { status, output } => {
                match status {
                    Some(code) => write!(f, "command exited with status {code}")?,
                    None => write!(f, "command terminated by signal")?,
                }
                if !output.is_empty() {
                    write!(f, ": {output}")?;
                }
                Ok(())
            }
            StepError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StepError {}

#[async_trait]
pub trait StepRunner: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the step must own the terminal while it runs.
    fn needs_terminal(&self, _step: &InstallStep) -> bool {
        false
    }

    /// Runs one step, sending each line of output to `log`.
    async fn run(
        &self,
        step: &InstallStep,
        choices: &UserChoices,
        log: Sender<String>,
    ) -> Result<(), StepError>;

    /// Runs one step with inherited stdio. Blocks; only called while the
    /// terminal UI is suspended.
    fn run_interactive(&self, step: &InstallStep, _choices: &UserChoices) -> Result<(), StepError> {
        Err(StepError::Spawn(format!(
            "{} cannot run '{}' interactively",
            self.name(),
            step.key
        )))
    }
}

/// Runs the shell command configured for each step key.
pub struct CommandStepRunner {
    steps: BTreeMap<String, StepConfig>,
    dry_run: bool,
}

impl CommandStepRunner {
    pub fn new(steps: BTreeMap<String, StepConfig>, dry_run: bool) -> Self {
        Self { steps, dry_run }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.steps.clone(), config.dry_run)
    }

    fn command_for(&self, step: &InstallStep) -> Option<&str> {
        self.steps
            .get(&step.key)
            .and_then(|s| s.command.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

#[async_trait]
impl StepRunner for CommandStepRunner {
    fn name(&self) -> &str {
        "command"
    }

    fn needs_terminal(&self, step: &InstallStep) -> bool {
        !self.dry_run
            && self.command_for(step).is_some()
            && self.steps.get(&step.key).is_some_and(|s| s.interactive)
    }

    async fn run(
        &self,
        step: &InstallStep,
        choices: &UserChoices,
        log: Sender<String>,
    ) -> Result<(), StepError> {
        let Some(command) = self.command_for(step) else {
            info!("No command configured for '{}', skipping", step.key);
            send_line(&log, format!("Skipped: no command configured for {}", step.key)).await;
            return Ok(());
        };
        if self.dry_run {
            info!("Dry run '{}': {}", step.key, command);
            send_line(&log, format!("[dry run] {command}")).await;
            return Ok(());
        }

        info!("Running '{}': {}", step.key, command);
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(choices.env_vars())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StepError::Spawn(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(forward_lines(out, log.clone())));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(forward_lines(err, log.clone())));

        let status = child
            .wait()
            .await
            .map_err(|e| StepError::Io(e.to_string()))?;

        if let Some(task) = stdout {
            let _ = task.await;
        }
        let tail = match stderr {
            Some(task) => task.await.unwrap_or_default(),
            None => Vec::new(),
        };

        if status.success() {
            debug!("Step '{}' exited cleanly", step.key);
            Ok(())
        } else {
            Err(StepError::Failed {
                status: status.code(),
                output: tail.join("\n"),
            })
        }
    }

    fn run_interactive(&self, step: &InstallStep, choices: &UserChoices) -> Result<(), StepError> {
        let Some(command) = self.command_for(step) else {
            return Ok(());
        };
        info!("Running '{}' interactively: {}", step.key, command);
        let status = std::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(choices.env_vars())
            .status()
            .map_err(|e| StepError::Spawn(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(StepError::Failed {
                status: status.code(),
                output: String::new(),
            })
        }
    }
}

async fn send_line(log: &Sender<String>, line: String) {
    if log.send(line).await.is_err() {
        debug!("Step log receiver dropped");
    }
}

/// Forwards every line of `reader` to `log`; returns the last few lines.
async fn forward_lines<R>(reader: R, log: Sender<String>) -> Vec<String>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut tail = VecDeque::with_capacity(ERROR_TAIL_LINES);
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tail.len() == ERROR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line.clone());
                send_line(&log, line).await;
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read step output: {}", e);
                break;
            }
        }
    }
    tail.into()
}
