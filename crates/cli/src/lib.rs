use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use smart_find_oracle::build_oracle;
use smart_find_protocol::{serialize_json, SearchMode};
use smart_find_search::{Dispatcher, ProcessExecutor, SearchError};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod report;

const USAGE: &str = "\
Usage: smart-find [options] <query>
Options:
  --list, -l  Print results one per line
  --fast, -f  Skip the semantic listing and AI ranking (faster)
  --json      Print a JSON envelope
Examples:
  smart-find \"*.ts\"                    # instant glob
  smart-find \"containing TODO\"         # keyword rule
  smart-find \"dropbox zoom workshop\"   # AI parallel search";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "smart-find")]
#[command(about = "Find files from a natural-language description", long_about = None)]
#[command(version)]
struct Cli {
    /// What to look for, e.g. "*.rs", "containing TODO", "config for database connection"
    query: Vec<String>,

    /// Print results one per line, in rank order
    #[arg(short, long)]
    list: bool,

    /// Programmatic search only: no semantic listing, no ranking
    #[arg(short, long)]
    fast: bool,

    /// Output JSON format
    #[arg(long, conflicts_with = "list")]
    json: bool,

    /// Project directory to search (defaults to current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Config file (defaults to <path>/.smart-find.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Machine-readable output keeps stderr to warnings.
    if cli.json || cli.list {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let root = cli.path.canonicalize().context("Invalid project path")?;
    let settings = config::load_settings(cli.config.as_deref(), &root)?;
    if let Some(source) = &settings.source {
        log::debug!("Loaded config from {}", source.display());
    }

    let oracle = build_oracle(&settings.oracle).context("Failed to configure oracle")?;
    let executor = Arc::new(ProcessExecutor::new(
        &root,
        settings.search.command_timeout,
    ));
    let dispatcher = Dispatcher::new(&root, settings.search, oracle, executor);

    let mode = if cli.fast {
        SearchMode::Fast
    } else {
        SearchMode::Full
    };

    let outcome = match dispatcher.search(&query, mode).await {
        Ok(outcome) => outcome,
        Err(SearchError::EmptyQuery) => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    if cli.json {
        let output = outcome.into_output(query.trim(), mode);
        return print_stdout(&serialize_json(&output, true)?);
    }

    if outcome.results.is_empty() {
        eprintln!("No files found");
        return Ok(());
    }

    let paths = outcome.results.as_slice();
    let text = if cli.list {
        report::render_list(paths)
    } else {
        report::render_grouped(paths, report::GROUP_THRESHOLD)
    };
    print_stdout(&text)
}
