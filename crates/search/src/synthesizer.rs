use smart_find_oracle::Oracle;
use smart_find_protocol::{SearchCommand, SearchTool, EXCLUDE_SET};
use std::sync::Arc;

/// Flags that make a search tool run other programs or touch the filesystem.
const FD_FORBIDDEN: &[&str] = &["-x", "--exec", "-X", "--exec-batch"];
const RG_FORBIDDEN: &[&str] = &["--pre", "--pre-glob", "-z", "--search-zip"];
const FIND_FORBIDDEN: &[&str] = &[
    "-exec", "-execdir", "-ok", "-okdir", "-delete", "-fprint", "-fprint0", "-fprintf", "-fls",
];
/// Forbidden single-letter flags, also caught inside bundles such as `-Hx`.
const FD_FORBIDDEN_SHORT: &[char] = &['x', 'X'];
const RG_FORBIDDEN_SHORT: &[char] = &['z'];

/// Turns a free-form query into search commands with the help of the oracle.
pub struct CommandSynthesizer {
    oracle: Arc<dyn Oracle>,
}

impl CommandSynthesizer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Ask the oracle for a command. Only whitelisted, well-formed commands survive;
    /// the list is empty when the oracle is unavailable or answers with prose.
    pub async fn synthesize(&self, query: &str) -> Vec<SearchCommand> {
        let response = self.oracle.ask(&command_prompt(query)).await;
        parse_commands(&response)
    }
}

pub fn command_prompt(query: &str) -> String {
    let excludes = EXCLUDE_SET
        .iter()
        .map(|dir| format!("-g \"!{dir}\""))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"You are a semantic file search expert. Find files matching: "{query}"

Work out what the user actually wants:
- Extract the core intent: what kind of file, what content?
- Consider synonyms and related terms
- Be flexible: finding something related is better than nothing

SEARCH STRATEGY:
1. Content search: rg -li "term1|term2|term3" --glob "*.ext"
   - -i for case insensitive matching
   - | to match ANY of the terms
   - pick 2-3 key terms from the query
2. File name search: fd -i "pattern" -e ext
3. Type-filtered search: fd -t f -e ext1 -e ext2
4. Never chain commands or use xargs; use a single rg with alternation instead

EXCLUDES (always add): {excludes}

EXAMPLES:
Query: "markdown file with dropbox link to zoom recording"
rg -li "dropbox|zoom|recording" --glob "*.md" -g "!node_modules" -g "!.git"

Query: "config for database connection"
rg -li "database|db|connection|postgres|mysql" --glob "*.{{json,yaml,yml,toml,env}}" -g "!node_modules" -g "!.git"

Query: "test files for authentication"
fd -i "auth" -e test.ts -e spec.ts -E node_modules -E .git

Output ONLY one command, no explanation:"#
    )
}

/// Keep response lines that start with a whitelisted program and parse into a safe argv.
pub fn parse_commands(response: &str) -> Vec<SearchCommand> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| starts_with_tool(line))
        .filter_map(|line| match parse_command(line) {
            Ok(cmd) => Some(cmd),
            Err(reason) => {
                log::warn!("Discarding oracle command '{line}': {reason}");
                None
            }
        })
        .collect()
}

fn starts_with_tool(line: &str) -> bool {
    SearchTool::ALL.iter().any(|tool| {
        line.strip_prefix(tool.program())
            .is_some_and(|rest| rest.starts_with(char::is_whitespace))
    })
}

fn parse_command(line: &str) -> Result<SearchCommand, String> {
    let argv = shell_words::split(line).map_err(|err| err.to_string())?;
    let cmd = SearchCommand::from_argv(argv).ok_or_else(|| "empty command".to_string())?;
    let tool = cmd
        .tool()
        .ok_or_else(|| format!("'{}' is not a search tool", cmd.program()))?;
    validate_arguments(tool, cmd.arguments())?;
    Ok(cmd.with_excludes())
}

/// Reject argument shapes that escape a read-only search.
fn validate_arguments(tool: SearchTool, args: &[String]) -> Result<(), String> {
    let (forbidden, forbidden_short) = match tool {
        SearchTool::Fd => (FD_FORBIDDEN, FD_FORBIDDEN_SHORT),
        SearchTool::Rg => (RG_FORBIDDEN, RG_FORBIDDEN_SHORT),
        // find has no short-flag bundling.
        SearchTool::Find => (FIND_FORBIDDEN, &[][..]),
    };
    for arg in args {
        let flag = arg.split_once('=').map_or(arg.as_str(), |(flag, _)| flag);
        if forbidden.contains(&flag) {
            return Err(format!("flag '{flag}' is not allowed"));
        }
        if let Some(short) = bundled_short_flags(flag) {
            if let Some(c) = short.chars().find(|c| forbidden_short.contains(c)) {
                return Err(format!("flag '-{c}' in '{arg}' is not allowed"));
            }
        }
    }
    Ok(())
}

/// Letters of a bundled short-flag token like `-Hx`; `None` for long flags and values.
fn bundled_short_flags(arg: &str) -> Option<&str> {
    let letters = arg.strip_prefix('-')?;
    if letters.starts_with('-') || letters.len() < 2 {
        return None;
    }
    letters.chars().all(|c| c.is_ascii_alphabetic()).then_some(letters)
}
