use crate::error::{OracleError, Result};
use crate::Oracle;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Oracle backed by an external command line tool.
///
/// Each call spawns `argv[0] argv[1..] <prompt>` and returns its stdout. The diagnostic
/// channel is discarded, there is no retry, and a call that outlives `timeout` is killed.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    argv: Vec<String>,
    timeout: Duration,
}

impl CommandOracle {
    pub fn new(argv: Vec<String>, timeout: Duration) -> Result<Self> {
        if argv.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(OracleError::Config(
                "oracle command must include a program".to_string(),
            ));
        }
        Ok(Self { argv, timeout })
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub async fn try_ask(&self, prompt: &str) -> Result<String> {
        let mut cmd = Command::new(&self.argv[0]);
        cmd.args(&self.argv[1..])
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| OracleError::Timeout(self.timeout.as_secs()))?
            .map_err(|err| {
                OracleError::Unavailable(format!("failed to spawn '{}': {err}", self.program()))
            })?;

        if !output.status.success() {
            return Err(OracleError::Failed {
                status: output.status.to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|_| OracleError::Unavailable("response is not valid UTF-8".to_string()))
    }
}

#[async_trait]
impl Oracle for CommandOracle {
    async fn ask(&self, prompt: &str) -> String {
        match self.try_ask(prompt).await {
            Ok(text) => {
                if text.trim().is_empty() {
                    log::debug!("Oracle '{}' returned no output", self.program());
                }
                text
            }
            Err(err) => {
                log::warn!("{err}");
                String::new()
            }
        }
    }
}
