use smart_find_protocol::{SearchCommand, SearchTool};

/// Exact phrases resolvable without the oracle, mapped to `fd` arguments.
/// Exclusions are appended when the command is built.
const INSTANT_PATTERNS: &[(&str, &[&str])] = &[
    // File extensions
    ("*.ts", &["-e", "ts", "-t", "f"]),
    ("*.tsx", &["-e", "tsx", "-t", "f"]),
    ("*.js", &["-e", "js", "-t", "f"]),
    ("*.json", &["-e", "json", "-t", "f"]),
    ("*.md", &["-e", "md", "-t", "f"]),
    ("*.sh", &["-e", "sh", "-t", "f"]),
    ("*.lua", &["-e", "lua", "-t", "f"]),
    ("*.css", &["-e", "css", "-t", "f"]),
    ("*.html", &["-e", "html", "-t", "f"]),
    ("*.py", &["-e", "py", "-t", "f"]),
    ("*.go", &["-e", "go", "-t", "f"]),
    ("*.rs", &["-e", "rs", "-t", "f"]),
    ("*.yaml", &["-e", "yaml", "-e", "yml", "-t", "f"]),
    ("*.toml", &["-e", "toml", "-t", "f"]),
    // Common queries
    ("typescript", &["-e", "ts", "-e", "tsx", "-t", "f"]),
    (
        "config",
        &["-e", "json", "-e", "yaml", "-e", "yml", "-e", "toml", "-e", "ini", "-t", "f"],
    ),
    ("tests", &["-g", "*.test.*", "-g", "*.spec.*", "-t", "f"]),
    ("scripts", &["-e", "sh", "-t", "f"]),
    ("readme", &["-i", "readme", "-t", "f"]),
];

/// Maps a query onto a deterministic `fd` search by exact phrase or `*.<ext>` glob.
pub struct PatternClassifier;

impl PatternClassifier {
    #[must_use]
    pub fn classify(query: &str) -> Option<SearchCommand> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }

        if let Some((_, args)) = INSTANT_PATTERNS.iter().find(|(phrase, _)| *phrase == q) {
            return Some(fd(args.iter().copied()));
        }

        let ext = q.strip_prefix("*.")?;
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(fd(["-e", ext, "-t", "f"]))
    }

    /// Whether `query` is answered without consulting the oracle.
    #[must_use]
    pub fn is_instant(query: &str) -> bool {
        Self::classify(query).is_some()
    }
}

fn fd<'a>(args: impl IntoIterator<Item = &'a str>) -> SearchCommand {
    SearchCommand::new(SearchTool::Fd).args(args).with_excludes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smart_find_protocol::EXCLUDE_SET;

    fn leading_args(cmd: &SearchCommand) -> Vec<&str> {
        cmd.arguments()
            .iter()
            .map(String::as_str)
            .take_while(|a| *a != "-E")
            .collect()
    }

    #[test]
    fn rust_glob_is_an_extension_search() {
        let cmd = PatternClassifier::classify("*.rs").expect("instant");
        assert_eq!(cmd.program(), "fd");
        assert_eq!(leading_args(&cmd), vec!["-e", "rs", "-t", "f"]);
        assert!(cmd.excludes_all());
        assert_eq!(cmd.arguments().len(), 4 + EXCLUDE_SET.len() * 2);
    }

    #[test]
    fn yaml_covers_both_spellings() {
        let cmd = PatternClassifier::classify("*.yaml").expect("instant");
        assert_eq!(leading_args(&cmd), vec!["-e", "yaml", "-e", "yml", "-t", "f"]);
    }

    #[test]
    fn phrases_match_case_insensitively() {
        let cmd = PatternClassifier::classify("  README ").expect("instant");
        assert_eq!(leading_args(&cmd), vec!["-i", "readme", "-t", "f"]);

        let cmd = PatternClassifier::classify("Tests").expect("instant");
        assert_eq!(
            leading_args(&cmd),
            vec!["-g", "*.test.*", "-g", "*.spec.*", "-t", "f"]
        );
    }

    #[test]
    fn unknown_glob_extension_is_synthesized() {
        let cmd = PatternClassifier::classify("*.Vue").expect("instant");
        assert_eq!(leading_args(&cmd), vec!["-e", "vue", "-t", "f"]);
        assert!(cmd.excludes_all());
    }

    #[test]
    fn non_matches_defer() {
        assert!(PatternClassifier::classify("").is_none());
        assert!(PatternClassifier::classify("*.").is_none());
        assert!(PatternClassifier::classify("*.tar.gz").is_none());
        assert!(PatternClassifier::classify("config for database").is_none());
        assert!(!PatternClassifier::is_instant("containing TODO"));
    }
}
