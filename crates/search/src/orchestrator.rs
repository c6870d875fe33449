use crate::config::SearchConfig;
use crate::executor::{collect_paths, SearchExecutor};
use crate::listing::ProjectLister;
use crate::synthesizer::CommandSynthesizer;
use smart_find_oracle::Oracle;
use smart_find_protocol::{ResultSet, SearchCommand};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Marker line of the semantic-listing prompt.
pub const LISTING_PROMPT_MARKER: &str = "Here are files in the project:";

/// Output of the programmatic strategy.
#[derive(Debug, Clone, Default)]
pub struct ProgrammaticHits {
    pub command: Option<SearchCommand>,
    pub results: ResultSet,
}

/// Runs the semantic-listing and programmatic strategies.
pub struct Orchestrator {
    root: PathBuf,
    config: SearchConfig,
    oracle: Arc<dyn Oracle>,
    executor: Arc<dyn SearchExecutor>,
    synthesizer: CommandSynthesizer,
}

impl Orchestrator {
    pub fn new(
        root: impl Into<PathBuf>,
        config: SearchConfig,
        oracle: Arc<dyn Oracle>,
        executor: Arc<dyn SearchExecutor>,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            synthesizer: CommandSynthesizer::new(oracle.clone()),
            oracle,
            executor,
        }
    }

    /// Both strategies, concurrently. Completes once both have finished.
    pub async fn orchestrate(&self, query: &str) -> (ResultSet, ProgrammaticHits) {
        let (semantic, programmatic) =
            tokio::join!(self.semantic_strategy(query), self.programmatic_strategy(query));
        log::info!("Natural found: {} files", semantic.len());
        log::info!("Programmatic found: {} files", programmatic.results.len());
        (semantic, programmatic)
    }

    /// Fast mode: the semantic-listing strategy never runs.
    pub async fn programmatic_only(&self, query: &str) -> ProgrammaticHits {
        self.programmatic_strategy(query).await
    }

    /// Let the oracle pick paths out of a bounded project listing.
    pub async fn semantic_strategy(&self, query: &str) -> ResultSet {
        log::info!("Natural: analyzing file tree...");
        let lister = ProjectLister::new(&self.root, self.config.listing_limit);
        let files = match lister.list_async().await {
            Ok(files) => files,
            Err(err) => {
                log::warn!("{err}");
                return ResultSet::new();
            }
        };
        if files.is_empty() {
            return ResultSet::new();
        }

        let response = self.oracle.ask(&listing_prompt(query, &files)).await;
        parse_picks(&response, &files, self.config.semantic_limit)
    }

    /// Execute the first synthesized command and collect its output.
    pub async fn programmatic_strategy(&self, query: &str) -> ProgrammaticHits {
        log::info!("Programmatic: generating search...");
        let Some(command) = self.synthesizer.synthesize(query).await.into_iter().next() else {
            log::debug!("No usable command synthesized for '{query}'");
            return ProgrammaticHits::default();
        };
        log::info!("  -> {command}");

        let results = collect_paths(self.executor.as_ref(), &command).await;
        ProgrammaticHits {
            command: Some(command),
            results,
        }
    }
}

pub fn listing_prompt(query: &str, files: &[String]) -> String {
    format!(
        r#"You are finding files for: "{query}"

{LISTING_PROMPT_MARKER}
{listing}

Pick up to 15 files most likely to match the user's intent.
Think semantically - what would contain "{query}"?
Consider directory names, file names, and common patterns.

Output ONLY file paths, one per line, best matches first:"#,
        listing = files.join("\n"),
    )
}

/// Path-like response lines that name a listed file, in response order, capped at `limit`.
pub fn parse_picks(response: &str, listed: &[String], limit: usize) -> ResultSet {
    let listed: HashSet<&str> = listed.iter().map(String::as_str).collect();
    let mut picks = ResultSet::new();
    for line in response.lines() {
        if picks.len() >= limit {
            break;
        }
        let candidate = normalize_pick(line);
        if !is_path_like(candidate) {
            continue;
        }
        if !listed.contains(candidate) {
            log::debug!("Dropping unlisted pick '{candidate}'");
            continue;
        }
        picks.push(candidate);
    }
    picks
}

fn normalize_pick(line: &str) -> &str {
    let trimmed = line.trim().trim_matches('`');
    trimmed.strip_prefix("./").unwrap_or(trimmed)
}

fn is_path_like(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'))
}
