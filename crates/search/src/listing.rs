use crate::error::{Result, SearchError};
use ignore::WalkBuilder;
use smart_find_protocol::EXCLUDE_SET;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Lists project files for the oracle to pick from.
///
/// Same visibility rules as `fd -t f`: hidden entries and gitignored paths are skipped, and
/// every `EXCLUDE_SET` directory is pruned.
pub struct ProjectLister {
    root: PathBuf,
    limit: usize,
}

impl ProjectLister {
    pub fn new(root: impl AsRef<Path>, limit: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            limit,
        }
    }

    /// Up to `limit` root-relative file paths, `/`-separated, in file-name order per directory.
    pub fn list(&self) -> Vec<String> {
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry.file_name()));

        for result in builder.build() {
            if files.len() >= self.limit {
                break;
            }
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                        continue;
                    }
                    if let Some(rel) = relative_path(&self.root, entry.path()) {
                        files.push(rel);
                    }
                }
                Err(e) => log::debug!("Skipping unreadable entry: {e}"),
            }
        }

        log::debug!("Listed {} files under {}", files.len(), self.root.display());
        files
    }

    /// [`ProjectLister::list`] off the async runtime.
    pub async fn list_async(self) -> Result<Vec<String>> {
        tokio::task::spawn_blocking(move || self.list())
            .await
            .map_err(|err| SearchError::Listing(err.to_string()))
    }
}

fn is_excluded_dir(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|name| EXCLUDE_SET.contains(&name))
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
