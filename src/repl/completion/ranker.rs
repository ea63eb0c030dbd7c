//! Merging and ranking of candidates

/// Filter, deduplicate and order the union of all source candidates.
///
/// A candidate is kept when it starts with `active` or with `:` followed by
/// `active`, since pseudo-selectors are written with their colon. Survivors are
/// sorted lexicographically. When nothing survives and `fallback_to_all` is set,
/// the whole union is returned instead so the user always sees something.
///
/// # Arguments
/// * `candidates` - Union of all sources, in source priority order
/// * `active` - Segment currently being typed
/// * `fallback_to_all` - Return the full union when no candidate matches
pub fn rank(candidates: Vec<String>, active: &str, fallback_to_all: bool) -> Vec<String> {
    let colon_prefixed = format!(":{active}");
    let mut ranked: Vec<String> = candidates
        .iter()
        .filter(|c| c.starts_with(active) || c.starts_with(&colon_prefixed))
        .cloned()
        .collect();

    if ranked.is_empty() {
        if !fallback_to_all {
            return ranked;
        }
        ranked = candidates;
    }

    ranked.sort();
    ranked.dedup();
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prefix_filter() {
        let ranked = rank(strings(&["$upper(", "$title", "text"]), "$t", true);
        assert_eq!(ranked, vec!["$title"]);
    }

    #[test]
    fn test_colon_prefixed_selectors_match() {
        let ranked = rank(strings(&[":json", ":keys", "json"]), "js", true);
        assert_eq!(ranked, vec![":json", "json"]);
    }

    #[test]
    fn test_dedup_and_sort() {
        let ranked = rank(strings(&["text", "name", "text", ":text"]), "", true);
        assert_eq!(ranked, vec![":text", "name", "text"]);
    }

    #[test]
    fn test_fallback_returns_full_union() {
        let ranked = rank(strings(&["text", "name", "text"]), "zzz", true);
        assert_eq!(ranked, vec!["name", "text"]);
    }

    #[test]
    fn test_fallback_disabled() {
        let ranked = rank(strings(&["text", "name"]), "zzz", false);
        assert!(ranked.is_empty());
    }
}
