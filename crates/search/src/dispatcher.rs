use crate::classifier::PatternClassifier;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::executor::{collect_paths, SearchExecutor};
use crate::fusion::MergeRanker;
use crate::orchestrator::Orchestrator;
use crate::rules::KeywordRules;
use smart_find_oracle::Oracle;
use smart_find_protocol::{ResultSet, SearchCommand, SearchMode, SearchOutput, Strategy};
use std::path::PathBuf;
use std::sync::Arc;

/// Result of one dispatch, with enough provenance to explain where the paths came from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    pub command: Option<SearchCommand>,
    pub semantic_hits: Option<usize>,
    pub programmatic_hits: Option<usize>,
    pub results: ResultSet,
}

impl SearchOutcome {
    fn direct(strategy: Strategy, command: SearchCommand, results: ResultSet) -> Self {
        Self {
            strategy,
            command: Some(command),
            semantic_hits: None,
            programmatic_hits: None,
            results,
        }
    }

    pub fn into_output(self, query: &str, mode: SearchMode) -> SearchOutput {
        SearchOutput {
            query: query.to_string(),
            mode,
            strategy: self.strategy,
            command: self.command.map(|c| c.to_shell_line()),
            semantic_hits: self.semantic_hits,
            programmatic_hits: self.programmatic_hits,
            results: self.results,
        }
    }
}

/// Entry point: deterministic resolution first, the oracle only when nothing else applies.
pub struct Dispatcher {
    executor: Arc<dyn SearchExecutor>,
    orchestrator: Orchestrator,
    ranker: MergeRanker,
}

impl Dispatcher {
    pub fn new(
        root: impl Into<PathBuf>,
        config: SearchConfig,
        oracle: Arc<dyn Oracle>,
        executor: Arc<dyn SearchExecutor>,
    ) -> Self {
        let ranker = MergeRanker::new(oracle.clone(), &config);
        let orchestrator = Orchestrator::new(root, config, oracle, executor.clone());
        Self {
            executor,
            orchestrator,
            ranker,
        }
    }

    pub async fn search(&self, query: &str, mode: SearchMode) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        if let Some(command) = PatternClassifier::classify(query) {
            log::info!("Instant: {command}");
            let results = collect_paths(self.executor.as_ref(), &command).await;
            return Ok(SearchOutcome::direct(Strategy::Instant, command, results));
        }

        if let Some((rule, command)) = KeywordRules::matching(query) {
            log::info!("Rule {rule}: {command}");
            let results = collect_paths(self.executor.as_ref(), &command).await;
            return Ok(SearchOutcome::direct(Strategy::Rule, command, results));
        }

        if mode == SearchMode::Fast {
            let hits = self.orchestrator.programmatic_only(query).await;
            return Ok(SearchOutcome {
                strategy: Strategy::Fast,
                command: hits.command,
                semantic_hits: None,
                programmatic_hits: Some(hits.results.len()),
                results: hits.results,
            });
        }

        log::info!("AI search: \"{query}\"");
        let (semantic, programmatic) = self.orchestrator.orchestrate(query).await;
        let results = self
            .ranker
            .merge_rank(query, &semantic, &programmatic.results)
            .await;
        log::info!("Final ranked: {} files", results.len());

        Ok(SearchOutcome {
            strategy: Strategy::Full,
            command: programmatic.command,
            semantic_hits: Some(semantic.len()),
            programmatic_hits: Some(programmatic.results.len()),
            results,
        })
    }
}
