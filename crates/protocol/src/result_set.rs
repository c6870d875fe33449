use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered, duplicate-free sequence of file paths. Earlier entries rank higher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ResultSet {
    paths: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-separated tool output. Lines are trimmed, blanks dropped.
    pub fn from_stdout(stdout: &str) -> Self {
        stdout.lines().map(str::trim).collect()
    }

    /// Append a path unless it is blank or already present. Returns whether it was added.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.is_empty() || self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}

impl<S: Into<String>> FromIterator<S> for ResultSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for ResultSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for path in iter {
            self.push(path);
        }
    }
}

impl From<Vec<String>> for ResultSet {
    fn from(paths: Vec<String>) -> Self {
        paths.into_iter().collect()
    }
}

impl From<ResultSet> for Vec<String> {
    fn from(set: ResultSet) -> Self {
        set.paths
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}
