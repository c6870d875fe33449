use crate::Oracle;
use async_trait::async_trait;

/// Answers every prompt with the same canned text.
#[derive(Debug, Clone, Default)]
pub struct StubOracle {
    response: String,
}

impl StubOracle {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn ask(&self, _prompt: &str) -> String {
        self.response.clone()
    }
}

/// Oracle that is never reachable. Every strategy relying on it degrades to empty results.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOracle;

#[async_trait]
impl Oracle for DisabledOracle {
    async fn ask(&self, _prompt: &str) -> String {
        String::new()
    }
}
