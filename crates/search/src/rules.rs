use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use smart_find_protocol::{SearchCommand, SearchTool};

/// A query shape and the command it produces. Rules are tried in table order.
pub struct KeywordRule {
    pub name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> SearchCommand,
}

impl KeywordRule {
    fn new(name: &'static str, pattern: &str, build: fn(&Captures<'_>) -> SearchCommand) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap_or_else(|err| panic!("rule '{name}': {err}")),
            build,
        }
    }

    fn apply(&self, query: &str) -> Option<SearchCommand> {
        self.pattern.captures(query).map(|caps| (self.build)(&caps))
    }
}

static RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        // "containing X" / "files containing X"
        KeywordRule::new(
            "containing",
            r#"(?i)^(?:files?\s+)?containing\s+["']?(\w+)["']?"#,
            |caps| {
                SearchCommand::new(SearchTool::Rg)
                    .arg("-l")
                    .arg(&caps[1])
                    .with_excludes()
            },
        ),
        // "<ext> files"
        KeywordRule::new("extension", r"(?i)^(\w+)\s+files?$", |caps| {
            SearchCommand::new(SearchTool::Fd)
                .args(["-e", &caps[1], "-t", "f"])
                .with_excludes()
        }),
        // "recent X", "recently modified X": the subject is matched but not used.
        KeywordRule::new(
            "recent",
            r"(?i)recent(?:ly)?(?:\s+(?:modified|edited|changed))?\s+(.+)",
            |_| {
                SearchCommand::new(SearchTool::Fd)
                    .args(["-t", "f", "--changed-within", "7d"])
                    .with_excludes()
            },
        ),
        KeywordRule::new("large", r"(?i)large\s+files?", |_| {
            SearchCommand::new(SearchTool::Fd)
                .args(["-t", "f", "-S", "+100k"])
                .with_excludes()
        }),
    ]
});

/// Ordered regex rules turning common query shapes into commands without the oracle.
pub struct KeywordRules;

impl KeywordRules {
    /// First matching rule wins. The query keeps its case so captured terms stay literal.
    #[must_use]
    pub fn apply(query: &str) -> Option<SearchCommand> {
        Self::matching(query).map(|(_, cmd)| cmd)
    }

    /// Like [`KeywordRules::apply`], also naming the rule that fired.
    #[must_use]
    pub fn matching(query: &str) -> Option<(&'static str, SearchCommand)> {
        let q = query.trim();
        if q.is_empty() {
            return None;
        }
        RULES
            .iter()
            .find_map(|rule| rule.apply(q).map(|cmd| (rule.name, cmd)))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|rule| rule.name)
    }
}
