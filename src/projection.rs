use std::collections::HashMap;

use itertools::Itertools;

use crate::entities::Movie;

/// Display-ready movie row: scalar fields plus the owning list's name,
/// never the poster bytes themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub length: Option<i32>,
    pub language: Option<String>,
    pub list_name: String,
    pub is_seen: Option<bool>,
    pub is_available: Option<bool>,
    pub is_deleted: bool,
    pub picture_address: Option<String>,
}

/// Shapes movies into display rows sorted by title ascending.
///
/// Collation is Rust `str` byte order: case-sensitive, so "Zulu" sorts
/// before "alien". A movie whose list is somehow missing from the map gets
/// an empty list name rather than being dropped.
pub fn project(movies: &[Movie], list_names: &HashMap<i64, String>) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = movies
        .iter()
        .map(|m| DisplayRow {
            id: m.id,
            title: m.title.clone(),
            year: m.year,
            length: m.length,
            language: m.language.clone(),
            list_name: list_names.get(&m.list_id).cloned().unwrap_or_default(),
            is_seen: m.is_seen,
            is_available: m.is_available,
            is_deleted: m.is_deleted,
            picture_address: m.picture_address.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    rows
}

/// Distinct languages for the filter dropdown.
///
/// Values are trimmed, blanks dropped, and grouped case-insensitively; the
/// representative casing of each group is the first value under ascending
/// byte-order sort, which makes the choice deterministic for a given set of
/// stored values.
pub fn distinct_languages(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .filter_map(|m| m.language.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .sorted_unstable()
        .unique_by(|v| v.to_lowercase())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::movie;

    #[test]
    fn rows_are_sorted_by_title() {
        let movies = vec![movie(1, 1, "Zodiac"), movie(2, 1, "Alien"), movie(3, 1, "Memento")];
        let names = HashMap::from([(1, "Thrillers".to_string())]);

        let rows = project(&movies, &names);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Memento", "Zodiac"]);
        assert!(rows.iter().all(|r| r.list_name == "Thrillers"));
    }

    #[test]
    fn missing_list_name_becomes_empty() {
        let movies = vec![movie(1, 42, "Alien")];
        let rows = project(&movies, &HashMap::new());
        assert_eq!(rows[0].list_name, "");
    }

    #[test]
    fn equal_titles_tie_break_on_id() {
        let movies = vec![movie(9, 1, "Dune"), movie(3, 1, "Dune")];
        let rows = project(&movies, &HashMap::new());
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[1].id, 9);
    }

    #[test]
    fn languages_collapse_case_insensitively() {
        let mut a = movie(1, 1, "A");
        a.language = Some("English".to_string());
        let mut b = movie(2, 1, "B");
        b.language = Some("english".to_string());

        let languages = distinct_languages(&[a, b]);
        assert_eq!(languages, vec!["English".to_string()]);
    }

    #[test]
    fn languages_are_trimmed_and_blanks_dropped() {
        let mut a = movie(1, 1, "A");
        a.language = Some("  French ".to_string());
        let mut b = movie(2, 1, "B");
        b.language = Some("   ".to_string());
        let c = movie(3, 1, "C");

        let languages = distinct_languages(&[a, b, c]);
        assert_eq!(languages, vec!["French".to_string()]);
    }

    #[test]
    fn language_representative_is_first_in_byte_order() {
        // "English" < "english" in byte order, so the capitalized form wins
        // regardless of insertion order.
        let mut a = movie(1, 1, "A");
        a.language = Some("english".to_string());
        let mut b = movie(2, 1, "B");
        b.language = Some("English".to_string());

        assert_eq!(distinct_languages(&[a, b]), vec!["English".to_string()]);
    }
}
