use serde::{Deserialize, Serialize};

mod command;
mod result_set;

pub use command::{SearchCommand, SearchTool, EXCLUDE_SET};
pub use result_set::ResultSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Semantic listing + programmatic search, merged and ranked
    #[default]
    Full,
    /// Programmatic search only, no ranking
    Fast,
}

/// Which branch of the dispatcher produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Instant,
    Rule,
    Fast,
    Full,
}

/// Output envelope emitted by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub mode: SearchMode,
    pub strategy: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_hits: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programmatic_hits: Option<usize>,
    pub results: ResultSet,
}

pub fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
