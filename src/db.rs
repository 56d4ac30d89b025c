//! All Postgres access. Queries are runtime `query_as` calls against the
//! shared pool; the only multi-statement write (category replacement on
//! movie edit) runs in a single transaction so a movie is never observable
//! with half its categories.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use crate::entities::{Category, CategoryWithList, List, Movie, MovieDraft};
use crate::filter::JoinRow;

// ---------------------------------------------------------------------------
// lists

pub async fn all_lists(pool: &PgPool) -> sqlx::Result<Vec<List>> {
    sqlx::query_as::<_, List>(r#"select id, name from lists order by name"#)
        .fetch_all(pool)
        .await
}

pub async fn find_list(pool: &PgPool, id: i64) -> sqlx::Result<Option<List>> {
    sqlx::query_as::<_, List>(r#"select id, name from lists where id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Best-effort duplicate pre-check; a concurrent insert can still race past it.
pub async fn list_name_taken(pool: &PgPool, name: &str, exclude: Option<i64>) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"select count(*) from lists where name = $1 and id != coalesce($2, -1)"#,
    )
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn insert_list(pool: &PgPool, name: &str) -> sqlx::Result<List> {
    sqlx::query_as::<_, List>(r#"insert into lists (name) values ($1) returning id, name"#)
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn update_list_name(pool: &PgPool, id: i64, name: &str) -> sqlx::Result<()> {
    sqlx::query(r#"update lists set name = $2 where id = $1"#)
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_names(pool: &PgPool) -> sqlx::Result<HashMap<i64, String>> {
    let lists = all_lists(pool).await?;
    Ok(lists.into_iter().map(|l| (l.id, l.name)).collect())
}

// ---------------------------------------------------------------------------
// categories

pub async fn all_categories(pool: &PgPool) -> sqlx::Result<Vec<CategoryWithList>> {
    sqlx::query_as::<_, CategoryWithList>(
        r#"select c.id, c.list_id, c.name, l.name as list_name
           from categories c join lists l on l.id = c.list_id
           order by c.name"#,
    )
    .fetch_all(pool)
    .await
}

pub async fn categories_for_list(pool: &PgPool, list_id: i64) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"select id, list_id, name from categories where list_id = $1 order by name"#,
    )
    .bind(list_id)
    .fetch_all(pool)
    .await
}

pub async fn find_category(pool: &PgPool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(r#"select id, list_id, name from categories where id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Duplicate pre-check scoped to one list; same race caveat as for lists.
pub async fn category_name_taken(
    pool: &PgPool,
    list_id: i64,
    name: &str,
    exclude: Option<i64>,
) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"select count(*) from categories
           where list_id = $1 and name = $2 and id != coalesce($3, -1)"#,
    )
    .bind(list_id)
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn insert_category(pool: &PgPool, list_id: i64, name: &str) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"insert into categories (list_id, name) values ($1, $2) returning id, list_id, name"#,
    )
    .bind(list_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn update_category(
    pool: &PgPool,
    id: i64,
    list_id: i64,
    name: &str,
) -> sqlx::Result<()> {
    sqlx::query(r#"update categories set list_id = $2, name = $3 where id = $1"#)
        .bind(id)
        .bind(list_id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

/// The subset of `ids` that exist and belong to `list_id`. Callers use this
/// to silently drop stale or foreign ids from a checkbox submission.
pub async fn valid_category_ids_in_list(
    pool: &PgPool,
    list_id: i64,
    ids: &[i64],
) -> sqlx::Result<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_scalar(r#"select id from categories where list_id = $1 and id = any($2)"#)
        .bind(list_id)
        .bind(ids)
        .fetch_all(pool)
        .await
}

// ---------------------------------------------------------------------------
// movies

pub async fn find_movie(pool: &PgPool, id: i64) -> sqlx::Result<Option<Movie>> {
    sqlx::query_as::<_, Movie>(r#"select * from movies where id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn movies_in_list(pool: &PgPool, list_id: i64) -> sqlx::Result<Vec<Movie>> {
    sqlx::query_as::<_, Movie>(r#"select * from movies where list_id = $1"#)
        .bind(list_id)
        .fetch_all(pool)
        .await
}

pub async fn movies_by_ids(pool: &PgPool, ids: &[i64]) -> sqlx::Result<Vec<Movie>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Movie>(r#"select * from movies where id = any($1)"#)
        .bind(ids)
        .fetch_all(pool)
        .await
}

pub async fn insert_movie(pool: &PgPool, draft: &MovieDraft, category_ids: &[i64]) -> sqlx::Result<i64> {
    let mut tx = pool.begin().await?;
    let movie_id: i64 = sqlx::query_scalar(
        r#"insert into movies
               (list_id, title, length, language, year, is_available, is_seen,
                description, picture_address, local_address, is_deleted)
           values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, false)
           returning id"#,
    )
    .bind(draft.list_id)
    .bind(&draft.title)
    .bind(draft.length)
    .bind(&draft.language)
    .bind(draft.year)
    .bind(draft.is_available)
    .bind(draft.is_seen)
    .bind(&draft.description)
    .bind(&draft.picture_address)
    .bind(&draft.local_address)
    .fetch_one(&mut *tx)
    .await?;

    attach_categories(&mut tx, movie_id, category_ids).await?;
    tx.commit().await?;
    Ok(movie_id)
}

/// Updates a movie's scalar fields and replaces its category set, all in
/// one transaction. Replacement is delete-all-then-insert, not a diff.
pub async fn update_movie(
    pool: &PgPool,
    id: i64,
    draft: &MovieDraft,
    category_ids: &[i64],
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"update movies
           set title = $2, length = $3, language = $4, year = $5,
               is_available = $6, is_seen = $7, description = $8,
               picture_address = coalesce($9, picture_address),
               local_address = $10
           where id = $1"#,
    )
    .bind(id)
    .bind(&draft.title)
    .bind(draft.length)
    .bind(&draft.language)
    .bind(draft.year)
    .bind(draft.is_available)
    .bind(draft.is_seen)
    .bind(&draft.description)
    .bind(&draft.picture_address)
    .bind(&draft.local_address)
    .execute(&mut *tx)
    .await?;

    sqlx::query(r#"delete from categorized_items where movie_id = $1"#)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    attach_categories(&mut tx, id, category_ids).await?;
    tx.commit().await?;
    Ok(())
}

async fn attach_categories(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: i64,
    category_ids: &[i64],
) -> sqlx::Result<()> {
    // Deduped here because the schema does not enforce it.
    let mut distinct = category_ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    for category_id in distinct {
        sqlx::query(r#"insert into categorized_items (movie_id, category_id) values ($1, $2)"#)
            .bind(movie_id)
            .bind(category_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub async fn set_movie_deleted(pool: &PgPool, id: i64, deleted: bool) -> sqlx::Result<bool> {
    let result = sqlx::query(r#"update movies set is_deleted = $2 where id = $1"#)
        .bind(id)
        .bind(deleted)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// categorized items

pub async fn category_ids_of_movie(pool: &PgPool, movie_id: i64) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar(
        r#"select distinct category_id from categorized_items where movie_id = $1"#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
}

/// Join rows restricted to the given categories, as input to the
/// intersection engine.
pub async fn join_rows_for_categories(pool: &PgPool, category_ids: &[i64]) -> sqlx::Result<Vec<JoinRow>> {
    if category_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        r#"select movie_id, category_id from categorized_items where category_id = any($1)"#,
    )
    .bind(category_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(movie_id, category_id)| JoinRow { movie_id, category_id })
        .collect())
}

pub async fn movie_ids_in_category(pool: &PgPool, category_id: i64) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar(
        r#"select distinct movie_id from categorized_items where category_id = $1"#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

// ---------------------------------------------------------------------------
// dashboard aggregates

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieStats {
    pub list_id: i64,
    pub total: i64,
    pub active: i64,
    pub deleted: i64,
    pub available: i64,
    pub seen: i64,
}

pub async fn movie_stats(pool: &PgPool) -> sqlx::Result<Vec<MovieStats>> {
    sqlx::query_as::<_, MovieStats>(
        r#"select list_id,
                  count(*) as total,
                  count(*) filter (where not is_deleted) as active,
                  count(*) filter (where is_deleted) as deleted,
                  count(*) filter (where not is_deleted and is_available is true) as available,
                  count(*) filter (where not is_deleted and is_seen is true) as seen
           from movies group by list_id"#,
    )
    .fetch_all(pool)
    .await
}

pub async fn category_counts(pool: &PgPool) -> sqlx::Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, i64)> =
        sqlx::query_as(r#"select list_id, count(*) from categories group by list_id"#)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Distinct languages per list, counted case-insensitively after trimming.
pub async fn language_counts(pool: &PgPool) -> sqlx::Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        r#"select list_id, count(distinct lower(trim(language)))
           from movies
           where language is not null and trim(language) <> ''
           group by list_id"#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}
