use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory names excluded from every traversal, whatever the tool.
pub const EXCLUDE_SET: [&str; 10] = [
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "vendor",
    "__pycache__",
    ".venv",
    ".cache",
    "coverage",
];

/// Filesystem search programs a command is allowed to start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTool {
    Fd,
    Rg,
    Find,
}

impl SearchTool {
    pub const ALL: [SearchTool; 3] = [SearchTool::Fd, SearchTool::Rg, SearchTool::Find];

    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            SearchTool::Fd => "fd",
            SearchTool::Rg => "rg",
            SearchTool::Find => "find",
        }
    }

    #[must_use]
    pub fn from_program(program: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.program() == program)
    }

    /// Tool-specific flags excluding a single directory name.
    #[must_use]
    pub fn exclude_args(self, dir: &str) -> Vec<String> {
        match self {
            SearchTool::Fd => vec!["-E".to_string(), dir.to_string()],
            SearchTool::Rg => vec![format!("--glob=!{dir}")],
            SearchTool::Find => vec![
                "-not".to_string(),
                "-path".to_string(),
                format!("*/{dir}/*"),
            ],
        }
    }

    /// Whether `args` already exclude `dir` in one of the spellings this tool accepts.
    fn excludes(self, args: &[String], dir: &str) -> bool {
        match self {
            SearchTool::Fd => args.windows(2).any(|pair| {
                matches!(pair[0].as_str(), "-E" | "--exclude") && trim_glob(&pair[1]) == dir
            }) || args
                .iter()
                .any(|arg| arg.strip_prefix("--exclude=").is_some_and(|v| trim_glob(v) == dir)),
            SearchTool::Rg => args.iter().any(|arg| {
                let value = arg
                    .strip_prefix("--glob=")
                    .or_else(|| arg.strip_prefix("-g="))
                    .unwrap_or(arg);
                value
                    .strip_prefix('!')
                    .is_some_and(|pattern| trim_glob(pattern) == dir)
            }),
            SearchTool::Find => args.windows(3).any(|w| {
                matches!(w[0].as_str(), "-not" | "!")
                    && matches!(w[1].as_str(), "-path" | "-wholename")
                    && trim_glob(&w[2]) == dir
            }),
        }
    }
}

/// Index of the first expression token: after `-H`/`-L`/`-P` and the starting paths.
fn find_expression_start(args: &[String]) -> usize {
    let options = args
        .iter()
        .take_while(|arg| matches!(arg.as_str(), "-H" | "-L" | "-P"))
        .count();
    options
        + args[options..]
            .iter()
            .take_while(|arg| !arg.starts_with('-') && !matches!(arg.as_str(), "(" | ")" | "!" | ","))
            .count()
}

fn trim_glob(value: &str) -> &str {
    value.trim_matches(|c| c == '*' || c == '/')
}

impl fmt::Display for SearchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Executable representation of a filesystem search: program plus argv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCommand {
    program: String,
    args: Vec<String>,
}

impl SearchCommand {
    pub fn new(tool: SearchTool) -> Self {
        Self {
            program: tool.program().to_string(),
            args: Vec::new(),
        }
    }

    /// Build from an already split argv. Returns `None` for an empty argv.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append exclusions for every `EXCLUDE_SET` entry the command does not already exclude.
    ///
    /// Flags are inserted before a `--` separator so they are never read as positional paths.
    /// `find` expressions are instead rewritten so the exclusions guard the whole expression.
    /// Commands whose program is not a known tool are returned unchanged.
    #[must_use]
    pub fn with_excludes(mut self) -> Self {
        let Some(tool) = self.tool() else {
            return self;
        };
        if tool == SearchTool::Find {
            return self.find_with_excludes();
        }
        let missing: Vec<String> = EXCLUDE_SET
            .iter()
            .filter(|dir| !tool.excludes(&self.args, dir))
            .flat_map(|dir| tool.exclude_args(dir))
            .collect();
        if missing.is_empty() {
            return self;
        }

        let insert_at = self
            .args
            .iter()
            .position(|arg| arg == "--")
            .unwrap_or(self.args.len());
        let tail = self.args.split_off(insert_at);
        self.args.extend(missing);
        self.args.extend(tail);
        self
    }

    /// `find <paths> <excludes> ( <expr> )`.
    ///
    /// The exclusions are and-ed in front of the whole expression, so an explicit action or
    /// an `-o` branch inside it can never reach an excluded path.
    fn find_with_excludes(mut self) -> Self {
        let prefix: Vec<String> = EXCLUDE_SET
            .iter()
            .flat_map(|dir| SearchTool::Find.exclude_args(dir))
            .collect();

        let start = find_expression_start(&self.args);
        let expr = self.args.split_off(start);
        if expr.starts_with(&prefix) {
            self.args.extend(expr);
            return self;
        }

        self.args.extend(prefix);
        if !expr.is_empty() {
            self.args.push("(".to_string());
            self.args.extend(expr);
            self.args.push(")".to_string());
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn tool(&self) -> Option<SearchTool> {
        SearchTool::from_program(&self.program)
    }

    /// True when every `EXCLUDE_SET` entry is excluded by the arguments.
    pub fn excludes_all(&self) -> bool {
        match self.tool() {
            Some(tool) => EXCLUDE_SET.iter().all(|dir| tool.excludes(&self.args, dir)),
            None => false,
        }
    }

    /// Shell-quoted rendering, suitable for logs and JSON output.
    pub fn to_shell_line(&self) -> String {
        let argv: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect();
        shell_words::join(argv)
    }
}

impl fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_line())
    }
}
