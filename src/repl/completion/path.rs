//! Import path completion

use std::path::MAIN_SEPARATOR;

use tracing::debug;

use super::fs::{EntryKind, FileSystem};
use super::source::{CandidateSource, CompletionRequest};
use crate::error::CompletionError;

/// Expands the partial path of an `import` expression against the filesystem.
///
/// Each candidate is the whole input line with the partial path replaced by a
/// matching entry; directories get a trailing separator so completion can
/// continue inside them.
#[derive(Debug, Clone, Copy)]
pub struct PathSource {
    /// Upper bound on entries considered per request
    max_matches: usize,
}

impl PathSource {
    pub fn new(max_matches: usize) -> Self {
        Self { max_matches }
    }

    /// Glob `<partial>*`, widening to a recursive pattern when nothing matches
    fn expand(&self, fs: &dyn FileSystem, partial: &str) -> Result<Vec<String>, CompletionError> {
        let hits = fs.glob(&format!("{partial}*"), self.max_matches)?;
        if !hits.is_empty() {
            return Ok(hits);
        }

        fs.glob(&deep_pattern(partial), self.max_matches)
    }
}

impl Default for PathSource {
    fn default() -> Self {
        Self::new(256)
    }
}

impl CandidateSource for PathSource {
    fn name(&self) -> &'static str {
        "path"
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Result<Vec<String>, CompletionError> {
        let (Some(partial), Some(range)) =
            (request.input.import_partial(), request.input.import_range())
        else {
            return Ok(Vec::new());
        };

        let fs = request.context.filesystem;
        let line = request.input.line;
        let mut candidates = Vec::new();

        let (before, after) = (&line[..range.start], &line[range.end..]);

        for hit in self.expand(fs, partial)? {
            match fs.entry_kind(&hit) {
                Ok(EntryKind::Directory) => {
                    candidates.push(format!("{before}{hit}{MAIN_SEPARATOR}{after}"));
                }
                Ok(EntryKind::File) => candidates.push(format!("{before}{hit}{after}")),
                Err(e) => debug!("Skipping import candidate {}: {}", hit, e),
            }
        }

        Ok(candidates)
    }
}

/// Recursive pattern below everything starting with `partial`.
///
/// `**` has to be a whole path component, so `dir/` becomes `dir/**` and
/// `dir/fe` becomes `dir/fe*/**`.
fn deep_pattern(partial: &str) -> String {
    if partial.ends_with('/') || partial.ends_with(MAIN_SEPARATOR) {
        format!("{partial}**")
    } else {
        format!("{partial}*/**")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{BindingTable, FunctionRegistry};
    use crate::repl::completion::context::CompletionContext;
    use crate::repl::completion::fs::MemoryFileSystem;
    use crate::repl::completion::position::QueryInput;

    fn path_candidates(line: &str, fs: &dyn FileSystem, max_matches: usize) -> Vec<String> {
        let bindings = BindingTable::new();
        let functions = FunctionRegistry::new();
        let context = CompletionContext::new(&bindings, &functions, fs);
        let input = QueryInput::parse(line);

        PathSource::new(max_matches)
            .candidates(&CompletionRequest {
                input: &input,
                context: &context,
            })
            .unwrap()
    }

    /// Lists an entry that no longer exists when stat'ed
    struct VanishingFileSystem {
        inner: MemoryFileSystem,
    }

    impl FileSystem for VanishingFileSystem {
        fn glob(&self, pattern: &str, limit: usize) -> Result<Vec<String>, CompletionError> {
            let mut hits = self.inner.glob(pattern, limit)?;
            hits.push("samples/feed-gone.xml".to_string());
            Ok(hits)
        }

        fn entry_kind(&self, path: &str) -> Result<EntryKind, CompletionError> {
            self.inner.entry_kind(path)
        }
    }

    /// Only answers recursive patterns, so the first glob comes back empty
    struct DeepOnlyFileSystem {
        inner: MemoryFileSystem,
    }

    impl FileSystem for DeepOnlyFileSystem {
        fn glob(&self, pattern: &str, limit: usize) -> Result<Vec<String>, CompletionError> {
            if pattern.contains("**") {
                self.inner.glob(pattern, limit)
            } else {
                Ok(Vec::new())
            }
        }

        fn entry_kind(&self, path: &str) -> Result<EntryKind, CompletionError> {
            self.inner.entry_kind(path)
        }
    }

    fn sample_tree() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("samples/feed.xml")
            .with_file("samples/adi/package.xml")
    }

    #[test]
    fn test_quoted_file_match() {
        let candidates = path_candidates("import \"samples/fe\"", &sample_tree(), 256);
        assert_eq!(candidates, vec!["import \"samples/feed.xml\""]);
    }

    #[test]
    fn test_directory_gets_separator() {
        let candidates = path_candidates("import sam", &sample_tree(), 256);
        assert_eq!(candidates, vec![format!("import samples{MAIN_SEPARATOR}")]);
    }

    #[test]
    fn test_fallback_to_deep_match() {
        let fs = DeepOnlyFileSystem {
            inner: MemoryFileSystem::new().with_file("feeds/2024/jan.xml"),
        };
        let candidates = path_candidates("import feeds/", &fs, 256);

        assert!(candidates.contains(&format!("import feeds/2024{MAIN_SEPARATOR}")));
        assert!(candidates.contains(&"import feeds/2024/jan.xml".to_string()));
    }

    #[test]
    fn test_no_import_no_candidates() {
        assert!(path_candidates("samples/fe", &sample_tree(), 256).is_empty());
    }

    #[test]
    fn test_vanished_entry_is_skipped() {
        let fs = VanishingFileSystem {
            inner: sample_tree(),
        };
        let candidates = path_candidates("import \"samples/fe\"", &fs, 256);
        assert_eq!(candidates, vec!["import \"samples/feed.xml\""]);
    }

    #[test]
    fn test_partial_repeated_earlier_in_line() {
        let fs = MemoryFileSystem::new().with_file("sam.xml");
        let candidates = path_candidates("sam import sam", &fs, 256);
        assert_eq!(candidates, vec!["sam import sam.xml"]);
    }

    #[test]
    fn test_match_limit() {
        let fs = MemoryFileSystem::new()
            .with_file("a1.xml")
            .with_file("a2.xml")
            .with_file("a3.xml");
        assert_eq!(path_candidates("import a", &fs, 2).len(), 2);
    }

    #[test]
    fn test_deep_pattern_shapes() {
        assert_eq!(deep_pattern("samples/"), "samples/**");
        assert_eq!(deep_pattern("samples/fe"), "samples/fe*/**");
    }
}
