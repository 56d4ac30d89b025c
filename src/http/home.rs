use std::collections::HashMap;

use askama::Template;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::db::{self, MovieStats};
use crate::entities::List;
use crate::http::{AppState, HtmlTemplate, Result};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    flash: String,
    rows: Vec<ListStatsRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ListStatsRow {
    pub list_id: i64,
    pub name: String,
    pub total_movies: i64,
    pub active_movies: i64,
    pub deleted_movies: i64,
    pub available_movies: i64,
    pub seen_movies: i64,
    pub categories_count: i64,
    pub languages_count: i64,
}

#[derive(Deserialize)]
pub(crate) struct DashboardParams {
    flash: Option<String>,
}

pub(crate) async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse> {
    let lists = db::all_lists(&state.pool).await?;
    let movie_stats = db::movie_stats(&state.pool).await?;
    let category_counts = db::category_counts(&state.pool).await?;
    let language_counts = db::language_counts(&state.pool).await?;

    let rows = merge_stats(&lists, &movie_stats, &category_counts, &language_counts);
    Ok(HtmlTemplate(DashboardTemplate {
        flash: params.flash.unwrap_or_default(),
        rows,
    }))
}

/// Combines the per-list aggregate queries into one row per list; lists
/// without movies or categories show zeroes.
fn merge_stats(
    lists: &[List],
    movie_stats: &[MovieStats],
    category_counts: &HashMap<i64, i64>,
    language_counts: &HashMap<i64, i64>,
) -> Vec<ListStatsRow> {
    let by_list: HashMap<i64, &MovieStats> =
        movie_stats.iter().map(|s| (s.list_id, s)).collect();

    lists
        .iter()
        .map(|list| {
            let stats = by_list.get(&list.id);
            ListStatsRow {
                list_id: list.id,
                name: list.name.clone(),
                total_movies: stats.map_or(0, |s| s.total),
                active_movies: stats.map_or(0, |s| s.active),
                deleted_movies: stats.map_or(0, |s| s.deleted),
                available_movies: stats.map_or(0, |s| s.available),
                seen_movies: stats.map_or(0, |s| s.seen),
                categories_count: category_counts.get(&list.id).copied().unwrap_or(0),
                languages_count: language_counts.get(&list.id).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_without_stats_show_zeroes() {
        let lists = vec![
            List { id: 1, name: "Action".to_string() },
            List { id: 2, name: "Drama".to_string() },
        ];
        let movie_stats = vec![MovieStats {
            list_id: 1,
            total: 10,
            active: 8,
            deleted: 2,
            available: 5,
            seen: 3,
        }];
        let category_counts = HashMap::from([(1, 4)]);
        let language_counts = HashMap::from([(1, 2)]);

        let rows = merge_stats(&lists, &movie_stats, &category_counts, &language_counts);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_movies, 10);
        assert_eq!(rows[0].deleted_movies, 2);
        assert_eq!(rows[0].categories_count, 4);
        assert_eq!(rows[0].languages_count, 2);
        assert_eq!(rows[1].total_movies, 0);
        assert_eq!(rows[1].categories_count, 0);
    }

    #[test]
    fn rows_follow_list_order() {
        let lists = vec![
            List { id: 5, name: "B".to_string() },
            List { id: 3, name: "A".to_string() },
        ];
        let rows = merge_stats(&lists, &[], &HashMap::new(), &HashMap::new());
        assert_eq!(rows[0].list_id, 5);
        assert_eq!(rows[1].list_id, 3);
    }
}
