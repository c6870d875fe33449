//! # Smart Find Oracle
//!
//! The oracle is an opaque text-generation service: one prompt in, one response out,
//! no session between calls. Backends never fail towards the caller; an unreachable or
//! misbehaving oracle answers with empty text and the search degrades accordingly.
//!
//! ```text
//! prompt ──> Oracle::ask ──> CommandOracle  (external CLI, bounded by a timeout)
//!                       ├──> StubOracle     (canned response)
//!                       └──> DisabledOracle (always empty)
//! ```

use async_trait::async_trait;
use std::sync::Arc;

mod command;
mod config;
mod error;
mod stub;

pub use command::CommandOracle;
pub use config::{OracleConfig, OracleMode, RawOracleConfig, DEFAULT_ORACLE_COMMAND};
pub use error::{OracleError, Result};
pub use stub::{DisabledOracle, StubOracle};

/// Stateless prompt -> text function. Calls may run concurrently.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Returns the raw response, or an empty string when the oracle is unavailable.
    async fn ask(&self, prompt: &str) -> String;
}

/// Build the backend selected by `config.mode`.
pub fn build_oracle(config: &OracleConfig) -> Result<Arc<dyn Oracle>> {
    log::debug!("Oracle mode: {}", config.mode.as_str());
    Ok(match config.mode {
        OracleMode::Command => Arc::new(CommandOracle::new(config.argv.clone(), config.timeout)?),
        OracleMode::Stub => Arc::new(StubOracle::new(config.stub_response.clone())),
        OracleMode::Off => Arc::new(DisabledOracle),
    })
}
