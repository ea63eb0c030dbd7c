//! Syntactic position classification
//!
//! Instead of each candidate source sniffing the raw line with its own regex,
//! the line is classified once into a closed set of [`InputPosition`]s. Several
//! positions can hold at the same time (an open bracket inside an import
//! expression, for instance); sources then dispatch on the positions they
//! care about.
//!
//! The probes are deliberately forgiving: a probe that does not match simply
//! means the position does not apply.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::segment::{committed_prefix, segment};

/// `:root` is offered while the line is empty, `:` or a partial `:root`
static ROOT_PROBE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?r?o?o?t?$").expect("root probe is a valid regex"));

/// Open bracket predicate, optionally starting with a known keyword
static BRACKET_PROBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(is|attributes|children|name|text)?\s*(.*)$")
        .expect("bracket probe is a valid regex")
});

/// An `as`/`is` clause followed by whitespace in the active segment
static CAST_CLAUSE_PROBE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(as|is)\s").expect("cast clause probe is a valid regex"));

/// Whole-word `as`/`is` and everything after it
static CAST_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(as|is)\b.*$").expect("cast keyword is a valid regex"));

/// `import` followed by an optionally quoted partial path
static IMPORT_PROBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*['"]?([^'"]*)"#).expect("import probe is a valid regex")
});

/// Line ends in a `children` accessor, optionally with `:fragment`
static CHILDREN_PROBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"children:?[A-Za-z-]*$").expect("children probe is a valid regex")
});

/// Same as [`CHILDREN_PROBE`] but the colon is already typed
static CHILDREN_COLON_PROBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"children:[A-Za-z-]*$").expect("children colon probe is a valid regex")
});

/// A syntactic position the cursor can be in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPosition {
    /// At the start of a query where `:root` may be written
    Root,

    /// Inside an open `[...` predicate in the active segment
    BracketPredicate,

    /// Where a type cast or type test may follow
    TypeCast {
        /// Line text each cast keyword is appended to
        stem: String,
    },

    /// Inside an `import` expression
    ImportPath {
        /// Partial path typed so far (never empty)
        partial: String,
        /// Byte range of `partial` within the line
        range: Range<usize>,
    },

    /// After a `children` accessor
    OrdinalAccessor {
        /// Whether `[n]` index forms apply (no colon typed yet)
        indexed: bool,
    },

    /// The line contains a `**` deep-descendant marker
    DeepDescendant,

    /// The line contains an open bracket somewhere
    InsideBracket,
}

/// A completion request's input line, segmented and classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput<'a> {
    /// Raw line as typed
    pub line: &'a str,
    /// Committed colon-delimited segments
    pub segments: Vec<&'a str>,
    /// Segment currently being typed
    pub active: &'a str,
    /// Positions that apply, in classification order
    pub positions: Vec<InputPosition>,
}

impl<'a> QueryInput<'a> {
    /// Segment and classify a line
    pub fn parse(line: &'a str) -> Self {
        let (segments, active) = segment(line);
        let positions = classify(line, &segments, active);

        Self {
            line,
            segments,
            active,
            positions,
        }
    }

    /// Committed segments joined back with `:`
    pub fn committed(&self) -> String {
        committed_prefix(&self.segments)
    }

    /// Check whether a position without payload applies
    pub fn is_at(&self, position: &InputPosition) -> bool {
        self.positions.contains(position)
    }

    /// Stem for type-cast candidates, if a cast may follow
    pub fn cast_stem(&self) -> Option<&str> {
        self.positions.iter().find_map(|p| match p {
            InputPosition::TypeCast { stem } => Some(stem.as_str()),
            _ => None,
        })
    }

    /// Partial import path, if inside an import expression
    pub fn import_partial(&self) -> Option<&str> {
        self.positions.iter().find_map(|p| match p {
            InputPosition::ImportPath { partial, .. } => Some(partial.as_str()),
            _ => None,
        })
    }

    /// Byte range of the partial import path within the line
    pub fn import_range(&self) -> Option<Range<usize>> {
        self.positions.iter().find_map(|p| match p {
            InputPosition::ImportPath { range, .. } => Some(range.clone()),
            _ => None,
        })
    }

    /// Ordinal accessor state, if after `children`
    pub fn ordinal_indexed(&self) -> Option<bool> {
        self.positions.iter().find_map(|p| match p {
            InputPosition::OrdinalAccessor { indexed } => Some(*indexed),
            _ => None,
        })
    }
}

/// Classify a line into every position that applies
pub fn classify(line: &str, segments: &[&str], active: &str) -> Vec<InputPosition> {
    let mut positions = Vec::new();

    if !active.ends_with('.') && ROOT_PROBE.is_match(line) {
        positions.push(InputPosition::Root);
    }

    if BRACKET_PROBE.is_match(active) {
        positions.push(InputPosition::BracketPredicate);
    }

    if line.ends_with(char::is_whitespace) || CAST_CLAUSE_PROBE.is_match(active) {
        positions.push(InputPosition::TypeCast {
            stem: cast_stem(segments, active),
        });
    }

    if let Some((partial, range)) = import_partial(line) {
        positions.push(InputPosition::ImportPath { partial, range });
    }

    if CHILDREN_PROBE.is_match(line) {
        positions.push(InputPosition::OrdinalAccessor {
            indexed: !CHILDREN_COLON_PROBE.is_match(line),
        });
    }

    if line.contains("**") {
        positions.push(InputPosition::DeepDescendant);
    }

    if line.contains('[') {
        positions.push(InputPosition::InsideBracket);
    }

    positions
}

/// Line text up to the active segment's first `as`/`is` keyword.
///
/// Only the active segment is cut; committed segments are kept verbatim even
/// when they contain their own cast clauses.
fn cast_stem(segments: &[&str], active: &str) -> String {
    let kept = match CAST_KEYWORD.find(active) {
        Some(m) => &active[..m.start()],
        None => active,
    };

    if segments.is_empty() {
        kept.to_string()
    } else {
        format!("{}:{}", committed_prefix(segments), kept)
    }
}

fn import_partial(line: &str) -> Option<(String, Range<usize>)> {
    let capture = IMPORT_PROBE.captures(line)?.get(1)?;
    let partial = capture.as_str().trim_end();

    if partial.is_empty() {
        None
    } else {
        let start = capture.start();
        Some((partial.to_string(), start..start + partial.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_root() {
        let input = QueryInput::parse("");
        assert_eq!(input.positions, vec![InputPosition::Root]);
    }

    #[test]
    fn test_partial_root_tokens() {
        for line in [":", ":r", ":ro", ":roo", ":root", "ro"] {
            let input = QueryInput::parse(line);
            assert!(input.is_at(&InputPosition::Root), "{line:?} should be root");
        }
    }

    #[test]
    fn test_non_root_lines() {
        for line in ["program", ":json", "$title"] {
            let input = QueryInput::parse(line);
            assert!(!input.is_at(&InputPosition::Root), "{line:?} is not root");
        }
    }

    #[test]
    fn test_bracket_predicate_in_active_segment() {
        let input = QueryInput::parse("**:[is ");
        assert!(input.is_at(&InputPosition::BracketPredicate));
        assert!(input.is_at(&InputPosition::InsideBracket));
        assert!(input.is_at(&InputPosition::DeepDescendant));

        // Bracket closed in an earlier segment only
        let input = QueryInput::parse("[name=\"ad\"]:te");
        assert!(!input.is_at(&InputPosition::BracketPredicate));
        assert!(input.is_at(&InputPosition::InsideBracket));
    }

    #[test]
    fn test_cast_after_trailing_space() {
        let input = QueryInput::parse("program ");
        assert_eq!(input.cast_stem(), Some("program "));
    }

    #[test]
    fn test_cast_stem_cuts_keyword() {
        let input = QueryInput::parse("program as ar");
        assert_eq!(input.cast_stem(), Some("program "));

        let input = QueryInput::parse("[is ");
        assert_eq!(input.cast_stem(), Some("["));
    }

    #[test]
    fn test_cast_stem_scoped_to_active_segment() {
        let input = QueryInput::parse("items as json:name ");
        assert_eq!(input.cast_stem(), Some("items as json:name "));
    }

    #[test]
    fn test_cast_clause_in_committed_segment_only() {
        let input = QueryInput::parse("items as json:name");
        assert_eq!(input.cast_stem(), None);

        let input = QueryInput::parse("items as json:zzz");
        assert!(
            !input
                .positions
                .iter()
                .any(|p| matches!(p, InputPosition::TypeCast { .. }))
        );
    }

    #[test]
    fn test_no_cast_without_clause() {
        let input = QueryInput::parse("program");
        assert_eq!(input.cast_stem(), None);
    }

    #[test]
    fn test_import_partial_quoted() {
        let input = QueryInput::parse("import \"samples/fe\"");
        assert_eq!(input.import_partial(), Some("samples/fe"));

        let input = QueryInput::parse("import 'samples/fe");
        assert_eq!(input.import_partial(), Some("samples/fe"));
    }

    #[test]
    fn test_import_range_points_after_keyword() {
        let input = QueryInput::parse("sam import sam");
        assert_eq!(input.import_partial(), Some("sam"));
        assert_eq!(input.import_range(), Some(11..14));

        let input = QueryInput::parse("import \"samples/fe\"  ");
        assert_eq!(input.import_range(), Some(8..18));
    }

    #[test]
    fn test_import_partial_unquoted() {
        let input = QueryInput::parse("import samples/");
        assert_eq!(input.import_partial(), Some("samples/"));
    }

    #[test]
    fn test_import_without_path() {
        let input = QueryInput::parse("import \"");
        assert_eq!(input.import_partial(), None);

        let input = QueryInput::parse("reimport x");
        assert_eq!(input.import_partial(), None);
    }

    #[test]
    fn test_children_accessor() {
        let input = QueryInput::parse("program:children");
        assert_eq!(input.ordinal_indexed(), Some(true));

        let input = QueryInput::parse("program:children:");
        assert_eq!(input.ordinal_indexed(), Some(false));

        let input = QueryInput::parse("children:fir");
        assert_eq!(input.ordinal_indexed(), Some(false));

        let input = QueryInput::parse("children[0]");
        assert_eq!(input.ordinal_indexed(), None);
    }

    #[test]
    fn test_committed_prefix() {
        let input = QueryInput::parse("a:b:c");
        assert_eq!(input.committed(), "a:b");
        assert_eq!(input.active, "c");
    }
}
