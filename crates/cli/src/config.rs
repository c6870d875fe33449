use anyhow::{Context, Result};
use serde::Deserialize;
use smart_find_oracle::{OracleConfig, RawOracleConfig};
use smart_find_search::{RawSearchConfig, SearchConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_CONFIG_FILE: &str = ".smart-find.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    search: Option<RawSearchConfig>,
    oracle: Option<RawOracleConfig>,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub search: SearchConfig,
    pub oracle: OracleConfig,
    pub source: Option<PathBuf>,
}

/// Resolve settings: built-in defaults, then the TOML file, then `SMART_FIND_*` variables.
///
/// An explicit `--config` path must exist; the per-project default file is optional.
pub(crate) fn load_settings(explicit: Option<&Path>, root: &Path) -> Result<Settings> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(root.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let file = match &path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            parse_config(&raw).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ConfigFile::default(),
    };

    Ok(Settings {
        search: SearchConfig::resolve(file.search)?,
        oracle: OracleConfig::resolve(file.oracle)?,
        source: path,
    })
}

fn parse_config(raw: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_find_oracle::OracleMode;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn parses_both_tables() {
        let cfg = parse_config(
            r#"
            [search]
            listing_limit = 200
            command_timeout_secs = 10

            [oracle]
            mode = "stub"
            command = "llm -m small"
            "#,
        )
        .expect("valid toml");
        let search = cfg.search.expect("search table");
        assert_eq!(search.listing_limit, Some(200));
        assert_eq!(search.command_timeout_secs, Some(10));
        let oracle = cfg.oracle.expect("oracle table");
        assert_eq!(oracle.mode.as_deref(), Some("stub"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[search]\nlisting_limt = 3\n").is_err());
        assert!(parse_config("[cache]\nttl = 3\n").is_err());
    }

    #[test]
    fn project_file_is_picked_up() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[search]\nrank_window = 20\n[oracle]\nmode = \"off\"\ntimeout_secs = 9\n",
        )
        .unwrap();

        let settings = load_settings(None, dir.path()).expect("settings");
        assert_eq!(settings.search.rank_window, 20);
        assert_eq!(settings.search.listing_limit, 500);
        assert_eq!(settings.source, Some(dir.path().join(DEFAULT_CONFIG_FILE)));
        // SMART_FIND_ORACLE_MODE may be set by the caller's environment.
        if std::env::var_os("SMART_FIND_ORACLE_MODE").is_none() {
            assert_eq!(settings.oracle.mode, OracleMode::Off);
        }
        if std::env::var_os("SMART_FIND_ORACLE_TIMEOUT_SECS").is_none() {
            assert_eq!(settings.oracle.timeout, Duration::from_secs(9));
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_settings(Some(&missing), dir.path()).is_err());
        assert!(load_settings(None, dir.path()).is_ok());
    }
}
