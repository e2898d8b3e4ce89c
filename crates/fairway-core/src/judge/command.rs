use super::Judge;
use crate::model::JudgeResult;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Result as printed on stdout by the judge program.
#[derive(Debug, Deserialize)]
struct WireResult {
    pass: bool,
    #[serde(default)]
    timeout: bool,
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    took_ms: u64,
}

impl From<WireResult> for JudgeResult {
    fn from(w: WireResult) -> Self {
        JudgeResult {
            pass: w.pass,
            timed_out: w.timeout,
            stdout: w.stdout.into_bytes(),
            stderr: w.stderr.into_bytes(),
            answer: w.answer,
            args: w.args,
            took: Duration::from_millis(w.took_ms),
        }
    }
}

/// Judge backed by an external program.
///
/// The program receives `{"hole", "lang", "code"}` as JSON on stdin and prints
/// one JSON result on stdout. It is killed if the returned future is dropped.
#[derive(Debug, Clone)]
pub struct CommandJudge {
    program: String,
    args: Vec<String>,
}

impl CommandJudge {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` list.
    pub fn from_argv(argv: &[String]) -> anyhow::Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("judge command is empty"))?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl Judge for CommandJudge {
    async fn execute(&self, hole: &str, lang: &str, code: &str) -> anyhow::Result<JudgeResult> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start judge '{}'", self.program))?;

        let payload = serde_json::to_vec(&json!({ "hole": hole, "lang": lang, "code": code }))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .await
                .context("failed to send submission to judge")?;
        }

        let output = child
            .wait_with_output()
            .await
            .context("failed to wait for judge")?;
        if !output.status.success() {
            anyhow::bail!(
                "judge exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let wire: WireResult =
            serde_json::from_slice(&output.stdout).context("judge printed an invalid result")?;
        Ok(wire.into())
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
