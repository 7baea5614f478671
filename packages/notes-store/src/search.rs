//! Case- and accent-insensitive substring search over notes.
//!
//! Pure functions; the store calls [`filter`] whenever the query changes.

use notes_client::Note;
use unicode_normalization::UnicodeNormalization;

use crate::colors::ColorCatalog;

/// Minimum normalized query length for search to be active.
pub const MIN_QUERY_LEN: usize = 2;

/// Lowercase, decompose and drop combining diacritical marks.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Whether `query` is long enough to replace the view with search results.
pub fn is_search_active(query: &str) -> bool {
    normalize(query).chars().count() >= MIN_QUERY_LEN
}

/// Whether `note` matches an already normalized query.
pub fn matches(note: &Note, normalized_query: &str, catalog: &ColorCatalog) -> bool {
    if normalize(&note.title).contains(normalized_query) {
        return true;
    }
    if normalize(&note.description).contains(normalized_query) {
        return true;
    }

    match catalog.by_hex(&note.color) {
        Some(color) => {
            normalize(color.name).contains(normalized_query)
                || normalize(color.localized_name).contains(normalized_query)
        }
        None => false,
    }
}

/// Notes matching `query`, in their original relative order.
///
/// An inactive query returns `notes` unchanged.
pub fn filter(query: &str, notes: &[Note], catalog: &ColorCatalog) -> Vec<Note> {
    if !is_search_active(query) {
        return notes.to_vec();
    }

    let needle = normalize(query);
    notes
        .iter()
        .filter(|note| matches(note, &needle, catalog))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::note;

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_normalize_strips_case_and_accents() {
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("Ação"), "acao");
        assert_eq!(normalize("Ünïcödé"), "unicode");
    }

    #[test]
    fn test_activity_boundary() {
        assert!(!is_search_active(""));
        assert!(!is_search_active("m"));
        assert!(is_search_active("mi"));
        // "é" decomposes to two scalars but normalizes back to one
        assert!(!is_search_active("É"));
        assert!(is_search_active("éa"));
    }

    #[test]
    fn test_query_mi_matches_milk_only() {
        let notes = vec![note("1", "Milk", 0), note("2", "Eggs", 1)];
        let result = filter("mi", &notes, &ColorCatalog::builtin());
        assert_eq!(titles(&result), vec!["Milk"]);
    }

    #[test]
    fn test_cafe_matches_accented_title() {
        let notes = vec![note("1", "CAFÉ", 0)];
        assert_eq!(filter("cafe", &notes, &ColorCatalog::builtin()).len(), 1);
    }

    #[test]
    fn test_matches_description() {
        let mut n = note("1", "Groceries", 0);
        n.description = "Pão de queijo".into();
        let result = filter("pao", &[n], &ColorCatalog::builtin());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_matches_color_names() {
        let mut n = note("1", "Groceries", 0);
        n.color = "#FFA285".into();
        let notes = vec![n, note("2", "Chores", 1)];
        let catalog = ColorCatalog::builtin();

        assert_eq!(titles(&filter("orange", &notes, &catalog)), vec!["Groceries"]);
        assert_eq!(titles(&filter("laranja", &notes, &catalog)), vec!["Groceries"]);
        // white is the fixture color
        assert_eq!(titles(&filter("branco", &notes, &catalog)), vec!["Chores"]);
    }

    #[test]
    fn test_unknown_color_never_matches_by_name() {
        let mut n = note("1", "x", 0);
        n.color = "#000000".into();
        assert!(filter("black", &[n], &ColorCatalog::builtin()).is_empty());
    }

    #[test]
    fn test_filter_is_stable() {
        let notes = vec![
            note("3", "milk 3", 2),
            note("1", "milk 1", 0),
            note("2", "eggs", 1),
            note("4", "milk 4", 3),
        ];
        let result = filter("milk", &notes, &ColorCatalog::builtin());
        assert_eq!(titles(&result), vec!["milk 3", "milk 1", "milk 4"]);
    }

    #[test]
    fn test_inactive_query_returns_input() {
        let notes = vec![note("1", "Milk", 0), note("2", "Eggs", 1)];
        assert_eq!(filter("z", &notes, &ColorCatalog::builtin()), notes);
    }

    #[test]
    fn test_substring_property() {
        let catalog = ColorCatalog::builtin();
        let notes = vec![
            note("1", "Reunião às 10h", 0),
            note("2", "Lista de compras", 1),
            note("3", "Ideias", 2),
        ];
        for query in ["re", "às", "AS", "de", "ia", "xx", "10h"] {
            let result = filter(query, &notes, &catalog);
            let needle = normalize(query);
            for n in &notes {
                let expected = normalize(&n.title).contains(&needle)
                    || normalize(&n.description).contains(&needle)
                    || catalog
                        .by_hex(&n.color)
                        .map(|c| {
                            normalize(c.name).contains(&needle)
                                || normalize(c.localized_name).contains(&needle)
                        })
                        .unwrap_or(false);
                assert_eq!(result.contains(n), expected, "query {:?} note {:?}", query, n.title);
            }
        }
    }
}
