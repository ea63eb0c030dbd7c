//! Filesystem capability used for import-path completion
//!
//! Globbing and stat calls are the only blocking work the completion engine
//! does. They sit behind [`FileSystem`] so the path source can run against an
//! in-memory tree in tests and embedders.

use std::collections::BTreeMap;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::CompletionError;

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Glob and stat access for the path candidate source
pub trait FileSystem: Send + Sync {
    /// Expand a glob pattern into matching entry paths.
    ///
    /// Relative patterns are resolved against the filesystem root and returned
    /// relative to it, in the same shape the user typed them. Traversal stops
    /// once `limit` entries have been found.
    fn glob(&self, pattern: &str, limit: usize) -> Result<Vec<String>, CompletionError>;

    /// Determine whether `path` is a file or a directory
    fn entry_kind(&self, path: &str) -> Result<EntryKind, CompletionError>;
}

/// Real filesystem rooted at a directory
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    root: PathBuf,
}

impl DiskFileSystem {
    /// Create a filesystem view rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a filesystem view rooted at the process working directory
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root as a string that ends with exactly one separator
    fn root_prefix(&self) -> String {
        let root = self.root.to_string_lossy();
        if root.ends_with(MAIN_SEPARATOR) {
            root.into_owned()
        } else {
            format!("{root}{MAIN_SEPARATOR}")
        }
    }
}

impl FileSystem for DiskFileSystem {
    fn glob(&self, pattern: &str, limit: usize) -> Result<Vec<String>, CompletionError> {
        let absolute = Path::new(pattern).is_absolute();
        let prefix = self.root_prefix();
        let full_pattern = if absolute {
            pattern.to_string()
        } else {
            format!("{}{}", Pattern::escape(&prefix), pattern)
        };

        let mut hits = Vec::new();
        for entry in glob::glob(&full_pattern)? {
            if hits.len() >= limit {
                break;
            }
            match entry {
                Ok(path) => {
                    let display = path.to_string_lossy();
                    let relative = match display.strip_prefix(prefix.as_str()) {
                        Some(rest) if !absolute => rest.to_string(),
                        _ => display.to_string(),
                    };
                    hits.push(relative);
                }
                Err(e) => debug!("Skipping unreadable glob entry: {}", e),
            }
        }

        Ok(hits)
    }

    fn entry_kind(&self, path: &str) -> Result<EntryKind, CompletionError> {
        let metadata =
            std::fs::metadata(self.root.join(path)).map_err(|source| {
                CompletionError::FileSystem {
                    path: path.to_string(),
                    source,
                }
            })?;

        if metadata.is_dir() {
            Ok(EntryKind::Directory)
        } else {
            Ok(EntryKind::File)
        }
    }
}

/// In-memory filesystem keyed by `/`-separated relative paths
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: BTreeMap<String, EntryKind>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories
    pub fn with_file(mut self, path: &str) -> Self {
        self.insert_parents(path);
        self.entries.insert(path.to_string(), EntryKind::File);
        self
    }

    /// Add a directory, creating its parent directories
    pub fn with_dir(mut self, path: &str) -> Self {
        let path = path.trim_end_matches('/');
        self.insert_parents(path);
        self.entries.insert(path.to_string(), EntryKind::Directory);
        self
    }

    fn insert_parents(&mut self, path: &str) {
        let mut end = 0;
        while let Some(offset) = path[end..].find('/') {
            end += offset;
            if end > 0 {
                self.entries
                    .entry(path[..end].to_string())
                    .or_insert(EntryKind::Directory);
            }
            end += 1;
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn glob(&self, pattern: &str, limit: usize) -> Result<Vec<String>, CompletionError> {
        let pattern = Pattern::new(pattern)?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        Ok(self
            .entries
            .keys()
            .filter(|path| pattern.matches_with(path, options))
            .take(limit)
            .cloned()
            .collect())
    }

    fn entry_kind(&self, path: &str) -> Result<EntryKind, CompletionError> {
        self.entries
            .get(path.trim_end_matches('/'))
            .copied()
            .ok_or_else(|| CompletionError::FileSystem {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such entry"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("samples/feed.xml")
            .with_file("samples/adi/package.xml")
            .with_file("schedule.xmltv")
    }

    #[test]
    fn test_memory_parents_are_directories() {
        let fs = sample_tree();
        assert_eq!(fs.entry_kind("samples").unwrap(), EntryKind::Directory);
        assert_eq!(fs.entry_kind("samples/adi").unwrap(), EntryKind::Directory);
        assert_eq!(fs.entry_kind("samples/feed.xml").unwrap(), EntryKind::File);
    }

    #[test]
    fn test_memory_glob_single_level() {
        let fs = sample_tree();
        assert_eq!(
            fs.glob("samples/fe*", usize::MAX).unwrap(),
            vec!["samples/feed.xml"]
        );
        assert_eq!(fs.glob("sa*", usize::MAX).unwrap(), vec!["samples"]);
    }

    #[test]
    fn test_memory_glob_deep() {
        let fs = sample_tree();
        let hits = fs.glob("samples/**", usize::MAX).unwrap();
        assert!(hits.contains(&"samples/adi/package.xml".to_string()));
        assert!(hits.contains(&"samples/feed.xml".to_string()));
    }

    #[test]
    fn test_memory_glob_stops_at_limit() {
        let fs = MemoryFileSystem::new()
            .with_file("a1.xml")
            .with_file("a2.xml")
            .with_file("a3.xml");
        assert_eq!(fs.glob("a*", 2).unwrap(), vec!["a1.xml", "a2.xml"]);
    }

    #[test]
    fn test_memory_missing_entry_is_error() {
        let fs = sample_tree();
        assert!(matches!(
            fs.entry_kind("nope.xml"),
            Err(CompletionError::FileSystem { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let fs = sample_tree();
        assert!(matches!(
            fs.glob("samples/***", usize::MAX),
            Err(CompletionError::Pattern(_))
        ));
    }

    #[test]
    fn test_disk_glob_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("samples")).unwrap();
        std::fs::write(dir.path().join("samples").join("feed.xml"), "<rss/>").unwrap();

        let fs = DiskFileSystem::new(dir.path());
        let hits = fs.glob("samples/fe*", usize::MAX).unwrap();
        let expected = format!("samples{MAIN_SEPARATOR}feed.xml");

        assert_eq!(hits, vec![expected.clone()]);
        assert_eq!(fs.entry_kind(&expected).unwrap(), EntryKind::File);
        assert_eq!(fs.entry_kind("samples").unwrap(), EntryKind::Directory);
    }

    #[test]
    fn test_disk_glob_stops_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a1.xml", "a2.xml", "a3.xml"] {
            std::fs::write(dir.path().join(name), "<tv/>").unwrap();
        }

        let fs = DiskFileSystem::new(dir.path());
        assert_eq!(fs.glob("a*", 2).unwrap().len(), 2);
        assert_eq!(fs.glob("a*", usize::MAX).unwrap().len(), 3);
    }

    #[test]
    fn test_disk_entry_kind_missing() {
        let dir = tempfile::tempdir().unwrap();
        let fs = DiskFileSystem::new(dir.path());
        assert!(fs.entry_kind("gone.xml").is_err());
    }
}
