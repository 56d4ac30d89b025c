use std::collections::{HashMap, HashSet};

use crate::entities::Movie;

/// What an empty (or fully invalid) category selection means for the caller.
///
/// The intersect page shows nothing until something is ticked; the filter
/// page treats no ticked boxes as "no constraint from categories".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptySelectionPolicy {
    MatchAll,
    MatchNone,
}

/// One `categorized_items` row, reduced to the pair the engine cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinRow {
    pub movie_id: i64,
    pub category_id: i64,
}

/// Drops duplicate and unknown category ids from a raw selection,
/// preserving first-seen order.
pub fn validate_selection(selected: &[i64], valid: &HashSet<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    selected
        .iter()
        .copied()
        .filter(|id| valid.contains(id) && seen.insert(*id))
        .collect()
}

/// Movies carrying every selected category.
///
/// Join rows are restricted to the validated selection, grouped by movie,
/// and a movie qualifies iff its group covers the whole selection. Extra
/// categories on a movie never disqualify it. If validation leaves no
/// category ids at all, the result is decided by `policy` instead of the
/// groupby (a zero-wanted count would vacuously match everything).
pub fn intersect(
    selected: &[i64],
    valid: &HashSet<i64>,
    rows: &[JoinRow],
    policy: EmptySelectionPolicy,
    scope: &HashSet<i64>,
) -> HashSet<i64> {
    let wanted: HashSet<i64> = validate_selection(selected, valid).into_iter().collect();
    if wanted.is_empty() {
        return match policy {
            EmptySelectionPolicy::MatchAll => scope.clone(),
            EmptySelectionPolicy::MatchNone => HashSet::new(),
        };
    }

    let mut covered: HashMap<i64, HashSet<i64>> = HashMap::new();
    for row in rows {
        if wanted.contains(&row.category_id) && scope.contains(&row.movie_id) {
            covered.entry(row.movie_id).or_default().insert(row.category_id);
        }
    }

    covered
        .into_iter()
        .filter(|(_, categories)| categories.len() == wanted.len())
        .map(|(movie_id, _)| movie_id)
        .collect()
}

/// Optional scalar predicates over a movie, combined with logical AND.
///
/// An absent field is no constraint. Null movie fields never satisfy a
/// present constraint: a movie without a length is excluded from any
/// bounded length query, and a null flag matches neither `true` nor
/// `false`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub is_deleted: Option<bool>,
    pub is_available: Option<bool>,
    pub is_seen: Option<bool>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub language: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        *self == FilterSpec::default()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(want) = self.is_deleted {
            if movie.is_deleted != want {
                return false;
            }
        }
        if let Some(want) = self.is_available {
            if movie.is_available != Some(want) {
                return false;
            }
        }
        if let Some(want) = self.is_seen {
            if movie.is_seen != Some(want) {
                return false;
            }
        }
        if !bounded(movie.length, self.min_length, self.max_length) {
            return false;
        }
        if !bounded(movie.year, self.min_year, self.max_year) {
            return false;
        }
        if let Some(language) = &self.language {
            let want = language.trim();
            if !want.is_empty() && !language_matches(movie.language.as_deref(), want) {
                return false;
            }
        }
        true
    }
}

/// Inclusive bounds; a null value fails any present bound.
fn bounded(value: Option<i32>, min: Option<i32>, max: Option<i32>) -> bool {
    match (value, min, max) {
        (_, None, None) => true,
        (None, _, _) => false,
        (Some(v), min, max) => min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m),
    }
}

/// Trimmed, case-insensitive comparison; a blank stored language never
/// matches a non-blank filter.
fn language_matches(stored: Option<&str>, want: &str) -> bool {
    match stored.map(str::trim) {
        Some(have) if !have.is_empty() => have.to_lowercase() == want.to_lowercase(),
        _ => false,
    }
}

/// Category intersection composed with the scalar filters (logical AND).
pub fn apply<'a>(
    movies: &'a [Movie],
    selected: &[i64],
    valid: &HashSet<i64>,
    rows: &[JoinRow],
    policy: EmptySelectionPolicy,
    spec: &FilterSpec,
) -> Vec<&'a Movie> {
    let scope: HashSet<i64> = movies.iter().map(|m| m.id).collect();
    let ids = intersect(selected, valid, rows, policy, &scope);
    movies
        .iter()
        .filter(|m| ids.contains(&m.id) && spec.matches(m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::movie;

    fn ids(values: &[i64]) -> HashSet<i64> {
        values.iter().copied().collect()
    }

    fn rows(pairs: &[(i64, i64)]) -> Vec<JoinRow> {
        pairs
            .iter()
            .map(|&(movie_id, category_id)| JoinRow { movie_id, category_id })
            .collect()
    }

    #[test]
    fn validate_selection_drops_duplicates_and_unknown_ids() {
        let valid = ids(&[1, 2, 3]);
        assert_eq!(validate_selection(&[1, 1, 2, 999], &valid), vec![1, 2]);
        assert_eq!(validate_selection(&[999, 998], &valid), Vec::<i64>::new());
    }

    #[test]
    fn movie_must_carry_every_selected_category() {
        // List "Action Movies": Sci-Fi=10, Thriller=11. M1 tagged both, M2 only Sci-Fi.
        let valid = ids(&[10, 11]);
        let joins = rows(&[(1, 10), (1, 11), (2, 10)]);
        let scope = ids(&[1, 2]);

        let both = intersect(&[10, 11], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert_eq!(both, ids(&[1]));

        let one = intersect(&[10], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert_eq!(one, ids(&[1, 2]));
    }

    #[test]
    fn invalid_ids_are_silently_dropped_before_intersecting() {
        let valid = ids(&[10, 11]);
        let joins = rows(&[(1, 10), (1, 11), (2, 10)]);
        let scope = ids(&[1, 2]);

        let result = intersect(
            &[10, 11, 999],
            &valid,
            &joins,
            EmptySelectionPolicy::MatchNone,
            &scope,
        );
        assert_eq!(result, ids(&[1]));
    }

    #[test]
    fn extra_categories_on_a_movie_are_allowed() {
        let valid = ids(&[10, 11, 12]);
        let joins = rows(&[(1, 10), (1, 11), (1, 12)]);
        let scope = ids(&[1]);

        let result = intersect(&[10, 11], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert_eq!(result, ids(&[1]));
    }

    #[test]
    fn empty_selection_follows_the_policy() {
        let valid = ids(&[10]);
        let joins = rows(&[(1, 10)]);
        let scope = ids(&[1, 2, 3]);

        let all = intersect(&[], &valid, &joins, EmptySelectionPolicy::MatchAll, &scope);
        assert_eq!(all, scope);

        let none = intersect(&[], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert!(none.is_empty());
    }

    #[test]
    fn fully_invalid_selection_short_circuits_to_the_policy() {
        // Without the short-circuit, a wanted count of zero would match every
        // movie that has any join row at all.
        let valid = ids(&[10]);
        let joins = rows(&[(1, 10), (2, 10)]);
        let scope = ids(&[1, 2, 3]);

        let none = intersect(&[999], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert!(none.is_empty());

        let all = intersect(&[999], &valid, &joins, EmptySelectionPolicy::MatchAll, &scope);
        assert_eq!(all, scope);
    }

    #[test]
    fn duplicate_selection_counts_once() {
        let valid = ids(&[10, 11]);
        let joins = rows(&[(1, 10), (1, 11), (2, 10)]);
        let scope = ids(&[1, 2]);

        let result = intersect(
            &[10, 10, 11, 11],
            &valid,
            &joins,
            EmptySelectionPolicy::MatchNone,
            &scope,
        );
        assert_eq!(result, ids(&[1]));
    }

    #[test]
    fn rows_outside_the_scope_are_ignored() {
        let valid = ids(&[10]);
        let joins = rows(&[(1, 10), (7, 10)]);
        let scope = ids(&[1]);

        let result = intersect(&[10], &valid, &joins, EmptySelectionPolicy::MatchNone, &scope);
        assert_eq!(result, ids(&[1]));
    }

    #[test]
    fn equal_length_bounds_select_the_exact_length() {
        let spec = FilterSpec {
            min_length: Some(90),
            max_length: Some(90),
            ..FilterSpec::default()
        };

        let mut exact = movie(1, 1, "A");
        exact.length = Some(90);
        let mut near = movie(2, 1, "B");
        near.length = Some(91);
        let unset = movie(3, 1, "C");

        assert!(spec.matches(&exact));
        assert!(!spec.matches(&near));
        assert!(!spec.matches(&unset));
    }

    #[test]
    fn null_year_never_matches_a_bound() {
        let spec = FilterSpec {
            min_year: Some(1990),
            ..FilterSpec::default()
        };
        let mut old = movie(1, 1, "A");
        old.year = Some(1985);
        let mut new = movie(2, 1, "B");
        new.year = Some(1999);
        let unset = movie(3, 1, "C");

        assert!(!spec.matches(&old));
        assert!(spec.matches(&new));
        assert!(!spec.matches(&unset));
    }

    #[test]
    fn null_flags_match_neither_true_nor_false() {
        let unset = movie(1, 1, "A");

        let seen = FilterSpec {
            is_seen: Some(true),
            ..FilterSpec::default()
        };
        let unseen = FilterSpec {
            is_seen: Some(false),
            ..FilterSpec::default()
        };
        assert!(!seen.matches(&unset));
        assert!(!unseen.matches(&unset));
        assert!(FilterSpec::default().matches(&unset));
    }

    #[test]
    fn soft_delete_filter_is_an_exact_match() {
        let mut deleted = movie(1, 1, "A");
        deleted.is_deleted = true;
        let active = movie(2, 1, "B");

        let spec = FilterSpec {
            is_deleted: Some(false),
            ..FilterSpec::default()
        };
        assert!(!spec.matches(&deleted));
        assert!(spec.matches(&active));
        assert!(FilterSpec::default().matches(&deleted));
    }

    #[test]
    fn language_match_is_trimmed_and_case_insensitive() {
        let mut m = movie(1, 1, "A");
        m.language = Some(" English ".to_string());

        let spec = FilterSpec {
            language: Some("english".to_string()),
            ..FilterSpec::default()
        };
        assert!(spec.matches(&m));

        let blank_stored = movie(2, 1, "B");
        assert!(!spec.matches(&blank_stored));

        let mut whitespace_stored = movie(3, 1, "C");
        whitespace_stored.language = Some("   ".to_string());
        assert!(!spec.matches(&whitespace_stored));

        // A blank filter is no constraint.
        let blank_filter = FilterSpec {
            language: Some("  ".to_string()),
            ..FilterSpec::default()
        };
        assert!(blank_filter.matches(&blank_stored));
    }

    #[test]
    fn predicates_commute() {
        let mut m = movie(1, 1, "A");
        m.year = Some(1994);
        m.length = Some(120);
        m.language = Some("French".to_string());
        m.is_seen = Some(true);

        let spec = FilterSpec {
            is_seen: Some(true),
            min_year: Some(1990),
            max_length: Some(150),
            language: Some("FRENCH".to_string()),
            ..FilterSpec::default()
        };
        // AND of independent predicates; order of field checks cannot matter,
        // so a single combined check suffices alongside each individual one.
        assert!(spec.matches(&m));
        for single in [
            FilterSpec { is_seen: Some(true), ..FilterSpec::default() },
            FilterSpec { min_year: Some(1990), ..FilterSpec::default() },
            FilterSpec { max_length: Some(150), ..FilterSpec::default() },
            FilterSpec { language: Some("FRENCH".to_string()), ..FilterSpec::default() },
        ] {
            assert!(single.matches(&m));
        }
    }

    #[test]
    fn apply_composes_intersection_and_scalars() {
        let mut m1 = movie(1, 1, "M1");
        m1.year = Some(2001);
        let mut m2 = movie(2, 1, "M2");
        m2.year = Some(1985);
        let movies = vec![m1, m2];

        let valid = ids(&[10]);
        let joins = rows(&[(1, 10), (2, 10)]);
        let spec = FilterSpec {
            min_year: Some(2000),
            ..FilterSpec::default()
        };

        let matched = apply(&movies, &[10], &valid, &joins, EmptySelectionPolicy::MatchAll, &spec);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }
}
