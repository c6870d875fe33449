mod classifier;
mod config;
mod dispatcher;
mod error;
mod executor;
mod fusion;
mod listing;
mod orchestrator;
mod rules;
mod synthesizer;

pub use classifier::PatternClassifier;
pub use config::{RawSearchConfig, SearchConfig};
pub use dispatcher::{Dispatcher, SearchOutcome};
pub use error::{Result, SearchError};
pub use executor::{collect_paths, ProcessExecutor, SearchExecutor};
pub use fusion::{merge, ranking_prompt, MergeRanker};
pub use listing::ProjectLister;
pub use orchestrator::{listing_prompt, Orchestrator, ProgrammaticHits, LISTING_PROMPT_MARKER};
pub use rules::{KeywordRule, KeywordRules};
pub use synthesizer::{command_prompt, parse_commands, CommandSynthesizer};
