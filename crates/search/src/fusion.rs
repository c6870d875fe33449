use crate::config::SearchConfig;
use smart_find_oracle::Oracle;
use smart_find_protocol::ResultSet;
use std::sync::Arc;

/// Merges the semantic and programmatic result sets and, when the merge is large,
/// lets the oracle reorder the head of it.
pub struct MergeRanker {
    oracle: Arc<dyn Oracle>,
    threshold: usize,
    window: usize,
    keep: usize,
}

impl MergeRanker {
    pub fn new(oracle: Arc<dyn Oracle>, config: &SearchConfig) -> Self {
        Self {
            oracle,
            threshold: config.rank_threshold,
            window: config.rank_window,
            keep: config.rank_keep,
        }
    }

    /// Semantic picks come first: intent-level matches outrank lexical ones.
    ///
    /// Every emitted path is a member of `semantic ∪ programmatic`; oracle lines naming
    /// anything else are dropped. Nothing is truncated.
    pub async fn merge_rank(
        &self,
        query: &str,
        semantic: &ResultSet,
        programmatic: &ResultSet,
    ) -> ResultSet {
        let merged = merge(semantic, programmatic);
        if merged.len() <= self.threshold {
            return merged;
        }

        log::info!("Ranking top results...");
        let candidates: Vec<&str> = merged
            .iter()
            .take(self.window)
            .map(String::as_str)
            .collect();
        let response = self.oracle.ask(&ranking_prompt(query, &candidates)).await;

        let ranked = ranked_prefix(&response, &merged, self.keep);
        log::debug!("Oracle ranked {} of {} candidates", ranked.len(), merged.len());

        let mut result = ranked;
        result.extend(merged);
        result
    }
}

/// Concatenate, keeping the first occurrence of each path.
pub fn merge(semantic: &ResultSet, programmatic: &ResultSet) -> ResultSet {
    semantic.iter().chain(programmatic.iter()).cloned().collect()
}

pub fn ranking_prompt(query: &str, candidates: &[&str]) -> String {
    format!(
        "Query: \"{query}\"\n\nFiles found:\n{}\n\nPick the TOP 15 most relevant files. Output paths only, best first:",
        candidates.join("\n")
    )
}

fn ranked_prefix(response: &str, merged: &ResultSet, keep: usize) -> ResultSet {
    let mut ranked = ResultSet::new();
    for line in response.lines().map(str::trim) {
        if ranked.len() >= keep {
            break;
        }
        if merged.contains(line) {
            ranked.push(line);
        } else if !line.is_empty() {
            log::debug!("Dropping hallucinated path '{line}'");
        }
    }
    ranked
}
