use crate::error::{OracleError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_ORACLE_COMMAND: &str = "gemini -m gemini-3-flash-preview";
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OracleMode {
    /// Spawn an external text-generation command
    #[default]
    Command,
    /// Answer every prompt with a fixed response
    Stub,
    /// Never answer
    Off,
}

impl OracleMode {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "stub" => Ok(Self::Stub),
            "off" => Ok(Self::Off),
            other => Err(OracleError::Config(format!(
                "Unsupported oracle mode '{other}' (expected 'command', 'stub' or 'off')"
            ))),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Stub => "stub",
            Self::Off => "off",
        }
    }
}

/// `[oracle]` table of the config file. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOracleConfig {
    pub mode: Option<String>,
    pub command: Option<String>,
    pub timeout_secs: Option<u64>,
    pub stub_response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub mode: OracleMode,
    /// Program followed by its fixed arguments; the prompt is passed as the last argument.
    pub argv: Vec<String>,
    pub timeout: Duration,
    pub stub_response: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            mode: OracleMode::default(),
            argv: split_command(DEFAULT_ORACLE_COMMAND).unwrap_or_default(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
            stub_response: String::new(),
        }
    }
}

impl OracleConfig {
    /// Defaults, overlaid with the config file table, overlaid with the environment.
    pub fn resolve(raw: Option<RawOracleConfig>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(raw) = raw {
            cfg.apply_raw(raw)?;
        }
        cfg.apply_env()?;
        Ok(cfg)
    }

    fn apply_raw(&mut self, raw: RawOracleConfig) -> Result<()> {
        if let Some(mode) = raw.mode.as_deref() {
            self.mode = OracleMode::parse(mode)?;
        }
        if let Some(command) = raw.command.as_deref() {
            self.argv = split_command(command)?;
        }
        if let Some(secs) = raw.timeout_secs {
            self.timeout = timeout_from_secs(secs)?;
        }
        if let Some(stub) = raw.stub_response {
            self.stub_response = stub;
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(mode) = env_value("SMART_FIND_ORACLE_MODE") {
            self.mode = OracleMode::parse(&mode)?;
        }
        if let Some(command) = env_value("SMART_FIND_ORACLE_CMD") {
            self.argv = split_command(&command)?;
        }
        if let Some(raw) = env_value("SMART_FIND_ORACLE_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                OracleError::Config(format!(
                    "SMART_FIND_ORACLE_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                ))
            })?;
            self.timeout = timeout_from_secs(secs)?;
        }
        if let Ok(stub) = env::var("SMART_FIND_ORACLE_STUB") {
            self.stub_response = stub;
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(OracleError::Config(
            "oracle timeout must be at least one second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

pub(crate) fn split_command(raw: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(raw)
        .map_err(|err| OracleError::Config(format!("Failed to parse oracle command: {err}")))?;
    if argv.is_empty() {
        return Err(OracleError::Config(
            "oracle command must include a program".to_string(),
        ));
    }
    Ok(argv)
}
