use std::collections::HashSet;

use askama::Template;
use axum::extract::{Multipart, Path, Query as AxumQuery, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::db;
use crate::entities::MovieDraft;
use crate::error::FilmotekaError;
use crate::filter::{self, EmptySelectionPolicy, FilterSpec};
use crate::http::{
    fmt_opt_i32, parse_id, redirect_with_flash, ApiError, AppState, CheckItem, FieldError,
    HtmlTemplate, MovieRowView, OptionItem, Result,
};
use crate::images;
use crate::projection;

const TITLE_MAX_LEN: usize = 200;
const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// categorize form (create + edit)

#[derive(Template)]
#[template(path = "movie_form.html")]
struct MovieFormTemplate {
    flash: String,
    errors: Vec<FieldError>,
    heading: &'static str,
    action: String,
    lists: Vec<OptionItem>,
    list_locked: bool,
    list_id: String,
    categories: Vec<CheckItem>,
    title: String,
    year: String,
    length: String,
    language: String,
    description: String,
    local_address: String,
    is_available: bool,
    is_seen: bool,
    picture_address: String,
}

/// Multipart submission of the categorize form, read into plain strings
/// before validation.
#[derive(Default)]
struct MovieForm {
    list_id: Option<i64>,
    title: String,
    year: String,
    length: String,
    language: String,
    description: String,
    local_address: String,
    is_available: bool,
    is_seen: bool,
    selected_category_ids: Vec<i64>,
    picture: Option<Upload>,
}

struct Upload {
    content_type: String,
    bytes: Vec<u8>,
}

async fn read_movie_form(mut multipart: Multipart) -> Result<MovieForm> {
    let mut form = MovieForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::unprocessable_entity([("form", e.to_string())]))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "picture" {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::unprocessable_entity([("picture", e.to_string())]))?;
            if !bytes.is_empty() {
                form.picture = Some(Upload {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ApiError::unprocessable_entity([("form", e.to_string())]))?;
        match name.as_str() {
            "list_id" => form.list_id = text.trim().parse().ok(),
            "title" => form.title = text,
            "year" => form.year = text,
            "length" => form.length = text,
            "language" => form.language = text,
            "description" => form.description = text,
            "local_address" => form.local_address = text,
            // checkboxes submit a value only when ticked
            "is_available" => form.is_available = true,
            "is_seen" => form.is_seen = true,
            "selected_category_ids" => {
                if let Ok(id) = text.trim().parse() {
                    form.selected_category_ids.push(id);
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Non-blank input must be a whole number; blank means unset.
fn parse_optional_number(input: &str) -> std::result::Result<Option<i32>, ()> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| ())
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

struct ValidatedForm {
    draft: MovieDraft,
    category_ids: Vec<i64>,
}

/// Validates the submission against the database: list must exist, numbers
/// must parse, category ids are silently reduced to those belonging to the
/// chosen list.
async fn validate_movie_form(
    state: &AppState,
    form: &MovieForm,
    errors: &mut Vec<FieldError>,
) -> Result<Option<ValidatedForm>> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Title is required."));
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(FieldError::new("title", "Title must be 200 characters or fewer."));
    }

    match form.list_id {
        None => errors.push(FieldError::new("list_id", "Select a list.")),
        Some(list_id) => {
            if db::find_list(&state.pool, list_id).await?.is_none() {
                errors.push(FieldError::new("list_id", "Selected list does not exist."));
            }
        }
    }

    let year = parse_optional_number(&form.year).unwrap_or_else(|_| {
        errors.push(FieldError::new("year", "Enter a whole number."));
        None
    });
    let length = parse_optional_number(&form.length).unwrap_or_else(|_| {
        errors.push(FieldError::new("length", "Enter a whole number."));
        None
    });

    if !errors.is_empty() {
        return Ok(None);
    }

    let list_id = form.list_id.expect("validated above");
    let category_ids =
        db::valid_category_ids_in_list(&state.pool, list_id, &form.selected_category_ids).await?;

    let draft = MovieDraft {
        list_id,
        title,
        length,
        language: non_blank(&form.language),
        year,
        is_available: Some(form.is_available),
        is_seen: Some(form.is_seen),
        description: non_blank(&form.description),
        picture_address: None,
        local_address: form.is_available.then(|| non_blank(&form.local_address)).flatten(),
    };
    Ok(Some(ValidatedForm { draft, category_ids }))
}

/// Runs the poster pipeline for an upload, turning bad-upload problems
/// into field errors and leaving disk failures as request-level errors.
async fn store_poster(
    state: &AppState,
    upload: Upload,
    errors: &mut Vec<FieldError>,
) -> Result<Option<String>> {
    let saved = images::save_resized_poster(
        &state.config.storage.upload_dir,
        &upload.content_type,
        upload.bytes,
    )
    .await;
    match saved {
        Ok(web_path) => Ok(Some(web_path)),
        Err(FilmotekaError::UnsupportedImageType(_)) => {
            errors.push(FieldError::new("picture", "Only image uploads are allowed."));
            Ok(None)
        }
        Err(FilmotekaError::ImageDecode(_)) => {
            errors.push(FieldError::new("picture", "Could not read the image file."));
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}

async fn form_template(
    state: &AppState,
    form: &MovieForm,
    heading: &'static str,
    action: String,
    list_locked: bool,
    picture_address: String,
    flash: String,
    errors: Vec<FieldError>,
) -> Result<MovieFormTemplate> {
    let lists = db::all_lists(&state.pool)
        .await?
        .into_iter()
        .map(|l| OptionItem::new(l.id, l.name, form.list_id == Some(l.id)))
        .collect();

    let categories = match form.list_id {
        Some(list_id) => {
            let ticked: HashSet<i64> = form.selected_category_ids.iter().copied().collect();
            db::categories_for_list(&state.pool, list_id)
                .await?
                .into_iter()
                .map(|c| CheckItem {
                    id: c.id,
                    name: c.name,
                    checked: ticked.contains(&c.id),
                })
                .collect()
        }
        None => Vec::new(),
    };

    Ok(MovieFormTemplate {
        flash,
        errors,
        heading,
        action,
        lists,
        list_locked,
        list_id: form.list_id.map(|id| id.to_string()).unwrap_or_default(),
        categories,
        title: form.title.clone(),
        year: form.year.clone(),
        length: form.length.clone(),
        language: form.language.clone(),
        description: form.description.clone(),
        local_address: form.local_address.clone(),
        is_available: form.is_available,
        is_seen: form.is_seen,
        picture_address,
    })
}

#[derive(Deserialize)]
pub(crate) struct AddParams {
    list_id: Option<String>,
    flash: Option<String>,
}

pub(crate) async fn add_form(
    State(state): State<AppState>,
    AxumQuery(params): AxumQuery<AddParams>,
) -> Result<impl IntoResponse> {
    let form = MovieForm {
        list_id: parse_id(params.list_id.as_deref()),
        ..MovieForm::default()
    };
    let template = form_template(
        &state,
        &form,
        "Add a movie",
        "/movies/add".to_string(),
        false,
        String::new(),
        params.flash.unwrap_or_default(),
        Vec::new(),
    )
    .await?;
    Ok(HtmlTemplate(template))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let mut form = read_movie_form(multipart).await?;
    let mut errors = Vec::new();
    let validated = validate_movie_form(&state, &form, &mut errors).await?;

    if let Some(ValidatedForm { mut draft, category_ids }) = validated {
        if let Some(upload) = form.picture.take() {
            draft.picture_address = store_poster(&state, upload, &mut errors).await?;
        }
        if errors.is_empty() {
            db::insert_movie(&state.pool, &draft, &category_ids).await?;
            let target = format!("/movies/add?list_id={}", draft.list_id);
            return Ok(redirect_with_flash(&target, "Movie added and categorized!").into_response());
        }
    }

    let template = form_template(
        &state,
        &form,
        "Add a movie",
        "/movies/add".to_string(),
        false,
        String::new(),
        String::new(),
        errors,
    )
    .await?;
    Ok(HtmlTemplate(template).into_response())
}

#[derive(Deserialize)]
pub(crate) struct EditParams {
    flash: Option<String>,
}

pub(crate) async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AxumQuery(params): AxumQuery<EditParams>,
) -> Result<impl IntoResponse> {
    let movie = db::find_movie(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let category_ids = db::category_ids_of_movie(&state.pool, id).await?;

    let form = MovieForm {
        list_id: Some(movie.list_id),
        title: movie.title,
        year: fmt_opt_i32(movie.year),
        length: fmt_opt_i32(movie.length),
        language: movie.language.unwrap_or_default(),
        description: movie.description.unwrap_or_default(),
        local_address: movie.local_address.unwrap_or_default(),
        is_available: movie.is_available.unwrap_or(false),
        is_seen: movie.is_seen.unwrap_or(false),
        selected_category_ids: category_ids,
        picture: None,
    };
    let template = form_template(
        &state,
        &form,
        "Edit movie",
        format!("/movies/{}/edit", id),
        true,
        movie.picture_address.unwrap_or_default(),
        params.flash.unwrap_or_default(),
        Vec::new(),
    )
    .await?;
    Ok(HtmlTemplate(template))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response> {
    let movie = db::find_movie(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut form = read_movie_form(multipart).await?;
    let mut errors = Vec::new();

    // The list a movie belongs to is fixed; a mismatch means a stale or
    // tampered form.
    if form.list_id != Some(movie.list_id) {
        errors.push(FieldError::new("list_id", "Movie belongs to a different list."));
        form.list_id = Some(movie.list_id);
    }

    let validated = if errors.is_empty() {
        validate_movie_form(&state, &form, &mut errors).await?
    } else {
        None
    };

    if let Some(ValidatedForm { mut draft, category_ids }) = validated {
        if let Some(upload) = form.picture.take() {
            draft.picture_address = store_poster(&state, upload, &mut errors).await?;
        }
        if errors.is_empty() {
            db::update_movie(&state.pool, id, &draft, &category_ids).await?;
            let target = format!("/movies/{}/edit", id);
            return Ok(redirect_with_flash(&target, "Movie updated!").into_response());
        }
    }

    let template = form_template(
        &state,
        &form,
        "Edit movie",
        format!("/movies/{}/edit", id),
        true,
        movie.picture_address.unwrap_or_default(),
        String::new(),
        errors,
    )
    .await?;
    Ok(HtmlTemplate(template).into_response())
}

// ---------------------------------------------------------------------------
// soft delete / restore

pub(crate) async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let movie = db::find_movie(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    db::set_movie_deleted(&state.pool, id, true).await?;
    let target = format!("/movies/filter?list_id={}", movie.list_id);
    Ok(redirect_with_flash(&target, "Movie deleted.").into_response())
}

pub(crate) async fn restore(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let movie = db::find_movie(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    db::set_movie_deleted(&state.pool, id, false).await?;
    let target = format!("/movies/filter?list_id={}", movie.list_id);
    Ok(redirect_with_flash(&target, "Movie restored.").into_response())
}

// ---------------------------------------------------------------------------
// filter page

#[derive(Template)]
#[template(path = "filter.html")]
struct FilterTemplate {
    flash: String,
    lists: Vec<OptionItem>,
    list_chosen: bool,
    categories: Vec<CheckItem>,
    languages: Vec<OptionItem>,
    status_options: Vec<OptionItem>,
    available_options: Vec<OptionItem>,
    seen_options: Vec<OptionItem>,
    min_length: String,
    max_length: String,
    min_year: String,
    max_year: String,
    rows: Vec<MovieRowView>,
    total_count: usize,
    page: usize,
    total_pages: usize,
    prev_url: String,
    next_url: String,
}

/// Raw filter-page query. Everything arrives as text and is parsed
/// leniently: a read-only page should never fail on a garbled parameter.
#[derive(Deserialize, Default, Clone)]
pub(crate) struct FilterParams {
    list_id: Option<String>,
    #[serde(default)]
    selected: Vec<i64>,
    status: Option<String>,
    is_available: Option<String>,
    is_seen: Option<String>,
    min_length: Option<String>,
    max_length: Option<String>,
    min_year: Option<String>,
    max_year: Option<String>,
    language: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    flash: Option<String>,
}

fn parse_lenient_number(input: &Option<String>) -> Option<i32> {
    input
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn parse_tri_state(input: &Option<String>) -> Option<bool> {
    match input.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Deletion status dropdown: the default is active movies only; showing
/// deleted or all rows is an explicit choice.
fn parse_status(input: &Option<String>) -> Option<bool> {
    match input.as_deref() {
        Some("all") => None,
        Some("deleted") => Some(true),
        _ => Some(false),
    }
}

fn build_spec(params: &FilterParams) -> FilterSpec {
    FilterSpec {
        is_deleted: parse_status(&params.status),
        is_available: parse_tri_state(&params.is_available),
        is_seen: parse_tri_state(&params.is_seen),
        min_length: parse_lenient_number(&params.min_length),
        max_length: parse_lenient_number(&params.max_length),
        min_year: parse_lenient_number(&params.min_year),
        max_year: parse_lenient_number(&params.max_year),
        language: params
            .language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    }
}

fn parse_page(input: &Option<String>, default: usize, max: usize) -> usize {
    input
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(default)
        .min(max)
}

struct PageInfo {
    page: usize,
    total_pages: usize,
    total_count: usize,
}

fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> (Vec<T>, PageInfo) {
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.min(total_pages);
    let slice = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    (slice, PageInfo { page, total_pages, total_count })
}

/// Rebuilds the filter query string for a pagination link.
fn filter_query(params: &FilterParams, page: usize, page_size: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(list_id) = parse_id(params.list_id.as_deref()) {
        parts.push(format!("list_id={}", list_id));
    }
    for id in &params.selected {
        parts.push(format!("selected={}", id));
    }
    for (key, value) in [
        ("status", &params.status),
        ("is_available", &params.is_available),
        ("is_seen", &params.is_seen),
        ("min_length", &params.min_length),
        ("max_length", &params.max_length),
        ("min_year", &params.min_year),
        ("max_year", &params.max_year),
        ("language", &params.language),
    ] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(format!("{}={}", key, urlencoding::encode(value)));
        }
    }
    parts.push(format!("page_size={}", page_size));
    parts.push(format!("page={}", page));
    format!("/movies/filter?{}", parts.join("&"))
}

fn tri_state_options(current: &Option<String>) -> Vec<OptionItem> {
    let current = current.as_deref().unwrap_or("");
    vec![
        OptionItem::new("", "Any", !matches!(current, "true" | "false")),
        OptionItem::new("true", "Yes", current == "true"),
        OptionItem::new("false", "No", current == "false"),
    ]
}

fn status_options(current: &Option<String>) -> Vec<OptionItem> {
    let current = current.as_deref().unwrap_or("");
    vec![
        OptionItem::new("", "Active", !matches!(current, "deleted" | "all")),
        OptionItem::new("deleted", "Deleted", current == "deleted"),
        OptionItem::new("all", "All", current == "all"),
    ]
}

/// Scalar filters AND category intersection over one list. An empty
/// category selection means no category constraint here, unlike the
/// intersect page.
pub(crate) async fn filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse> {
    let chosen_list = parse_id(params.list_id.as_deref());
    let lists = db::all_lists(&state.pool)
        .await?
        .into_iter()
        .map(|l| OptionItem::new(l.id, l.name, chosen_list == Some(l.id)))
        .collect();

    let flash = params.flash.clone().unwrap_or_default();
    let Some(list_id) = chosen_list else {
        return Ok(HtmlTemplate(FilterTemplate {
            flash,
            lists,
            list_chosen: false,
            categories: Vec::new(),
            languages: Vec::new(),
            status_options: status_options(&None),
            available_options: tri_state_options(&None),
            seen_options: tri_state_options(&None),
            min_length: String::new(),
            max_length: String::new(),
            min_year: String::new(),
            max_year: String::new(),
            rows: Vec::new(),
            total_count: 0,
            page: 1,
            total_pages: 1,
            prev_url: String::new(),
            next_url: String::new(),
        }));
    };

    let list_categories = db::categories_for_list(&state.pool, list_id).await?;
    let valid: HashSet<i64> = list_categories.iter().map(|c| c.id).collect();
    let checked: HashSet<i64> = filter::validate_selection(&params.selected, &valid)
        .into_iter()
        .collect();
    let categories = list_categories
        .iter()
        .map(|c| CheckItem {
            id: c.id,
            name: c.name.clone(),
            checked: checked.contains(&c.id),
        })
        .collect();

    let movies = db::movies_in_list(&state.pool, list_id).await?;

    let current_language = params
        .language
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let mut languages = vec![OptionItem::new("", "Any", current_language.is_empty())];
    languages.extend(projection::distinct_languages(&movies).into_iter().map(|lang| {
        let selected = lang.to_lowercase() == current_language.to_lowercase();
        OptionItem::new(lang.clone(), lang, selected)
    }));

    let spec = build_spec(&params);
    let candidate_ids: Vec<i64> = checked.iter().copied().collect();
    let join_rows = db::join_rows_for_categories(&state.pool, &candidate_ids).await?;
    let matched = filter::apply(
        &movies,
        &params.selected,
        &valid,
        &join_rows,
        EmptySelectionPolicy::MatchAll,
        &spec,
    );

    let matched: Vec<_> = matched.into_iter().cloned().collect();
    let list_names = db::list_names(&state.pool).await?;
    let all_rows: Vec<MovieRowView> = projection::project(&matched, &list_names)
        .into_iter()
        .map(MovieRowView::from)
        .collect();

    let page_size = parse_page(&params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let requested_page = parse_page(&params.page, 1, usize::MAX);
    let (rows, info) = paginate(all_rows, requested_page, page_size);

    let prev_url = if info.page > 1 {
        filter_query(&params, info.page - 1, page_size)
    } else {
        String::new()
    };
    let next_url = if info.page < info.total_pages {
        filter_query(&params, info.page + 1, page_size)
    } else {
        String::new()
    };

    Ok(HtmlTemplate(FilterTemplate {
        flash,
        lists,
        list_chosen: true,
        categories,
        languages,
        status_options: status_options(&params.status),
        available_options: tri_state_options(&params.is_available),
        seen_options: tri_state_options(&params.is_seen),
        min_length: params.min_length.clone().unwrap_or_default(),
        max_length: params.max_length.clone().unwrap_or_default(),
        min_year: params.min_year.clone().unwrap_or_default(),
        max_year: params.max_year.clone().unwrap_or_default(),
        rows,
        total_count: info.total_count,
        page: info.page,
        total_pages: info.total_pages,
        prev_url,
        next_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_leniently_on_the_filter_page() {
        assert_eq!(parse_lenient_number(&Some(" 90 ".to_string())), Some(90));
        assert_eq!(parse_lenient_number(&Some("".to_string())), None);
        assert_eq!(parse_lenient_number(&Some("abc".to_string())), None);
        assert_eq!(parse_lenient_number(&None), None);
    }

    #[test]
    fn numbers_parse_strictly_on_write_forms() {
        assert_eq!(parse_optional_number(" 1994 "), Ok(Some(1994)));
        assert_eq!(parse_optional_number("  "), Ok(None));
        assert_eq!(parse_optional_number("ninety"), Err(()));
    }

    #[test]
    fn tri_state_only_accepts_true_and_false() {
        assert_eq!(parse_tri_state(&Some("true".to_string())), Some(true));
        assert_eq!(parse_tri_state(&Some("false".to_string())), Some(false));
        assert_eq!(parse_tri_state(&Some("".to_string())), None);
        assert_eq!(parse_tri_state(&Some("maybe".to_string())), None);
        assert_eq!(parse_tri_state(&None), None);
    }

    #[test]
    fn status_defaults_to_active_only() {
        assert_eq!(parse_status(&None), Some(false));
        assert_eq!(parse_status(&Some("".to_string())), Some(false));
        assert_eq!(parse_status(&Some("deleted".to_string())), Some(true));
        assert_eq!(parse_status(&Some("all".to_string())), None);
    }

    #[test]
    fn blank_language_is_no_constraint() {
        let params = FilterParams {
            language: Some("  ".to_string()),
            ..FilterParams::default()
        };
        assert_eq!(build_spec(&params).language, None);
    }

    #[test]
    fn pagination_clamps_the_requested_page() {
        let items: Vec<i32> = (1..=45).collect();
        let (slice, info) = paginate(items.clone(), 99, 20);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.page, 3);
        assert_eq!(info.total_count, 45);
        assert_eq!(slice.len(), 5);
        assert_eq!(slice[0], 41);

        let (first, info) = paginate(items, 1, 20);
        assert_eq!(first.len(), 20);
        assert_eq!(info.page, 1);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let (slice, info) = paginate(Vec::<i32>::new(), 1, 20);
        assert!(slice.is_empty());
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.page, 1);
    }

    #[test]
    fn pagination_links_preserve_the_filters() {
        let params = FilterParams {
            list_id: Some("3".to_string()),
            selected: vec![10, 11],
            status: Some("all".to_string()),
            language: Some("English".to_string()),
            min_year: Some("1990".to_string()),
            ..FilterParams::default()
        };
        let url = filter_query(&params, 2, 20);
        assert_eq!(
            url,
            "/movies/filter?list_id=3&selected=10&selected=11&status=all&min_year=1990&language=English&page_size=20&page=2"
        );
    }

    #[test]
    fn blank_parameters_are_dropped_from_links() {
        let params = FilterParams {
            list_id: Some("1".to_string()),
            min_length: Some("  ".to_string()),
            ..FilterParams::default()
        };
        let url = filter_query(&params, 1, 20);
        assert_eq!(url, "/movies/filter?list_id=1&page_size=20&page=1");
    }
}
