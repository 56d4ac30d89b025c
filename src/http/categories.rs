use std::collections::HashSet;

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::db;
use crate::filter::{self, EmptySelectionPolicy};
use crate::http::{
    parse_id, redirect_with_flash, ApiError, AppState, FieldError, HtmlTemplate, MovieRowView,
    OptionItem, Result,
};
use crate::projection;

const NAME_MAX_LEN: usize = 100;

// ---------------------------------------------------------------------------
// management page

#[derive(Template)]
#[template(path = "categories.html")]
struct CategoriesTemplate {
    flash: String,
    errors: Vec<FieldError>,
    edit_id: String,
    name: String,
    lists: Vec<OptionItem>,
    categories: Vec<CategoryRowView>,
}

struct CategoryRowView {
    id: i64,
    name: String,
    list_name: String,
}

async fn hydrate(state: &AppState, selected_list: Option<i64>) -> Result<(Vec<OptionItem>, Vec<CategoryRowView>)> {
    let lists = db::all_lists(&state.pool).await?;
    let options = lists
        .into_iter()
        .map(|l| OptionItem::new(l.id, l.name, selected_list == Some(l.id)))
        .collect();

    let categories = db::all_categories(&state.pool).await?;
    let rows = categories
        .into_iter()
        .map(|c| CategoryRowView {
            id: c.id,
            name: c.name,
            list_name: c.list_name,
        })
        .collect();
    Ok((options, rows))
}

#[derive(Deserialize)]
pub(crate) struct ManageParams {
    flash: Option<String>,
}

pub(crate) async fn manage(
    State(state): State<AppState>,
    Query(params): Query<ManageParams>,
) -> Result<impl IntoResponse> {
    let (lists, categories) = hydrate(&state, None).await?;
    Ok(HtmlTemplate(CategoriesTemplate {
        flash: params.flash.unwrap_or_default(),
        errors: Vec::new(),
        edit_id: String::new(),
        name: String::new(),
        lists,
        categories,
    }))
}

pub(crate) async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let category = db::find_category(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let (lists, categories) = hydrate(&state, Some(category.list_id)).await?;
    Ok(HtmlTemplate(CategoriesTemplate {
        flash: String::new(),
        errors: Vec::new(),
        edit_id: category.id.to_string(),
        name: category.name,
        lists,
        categories,
    }))
}

#[derive(Deserialize)]
pub(crate) struct SaveCategoryForm {
    edit_id: Option<i64>,
    list_id: Option<String>,
    name: String,
}

pub(crate) async fn save(
    State(state): State<AppState>,
    Form(form): Form<SaveCategoryForm>,
) -> Result<Response> {
    let name = form.name.trim().to_string();
    let chosen_list_id = parse_id(form.list_id.as_deref());
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(FieldError::new("name", "Name must be 100 characters or fewer."));
    }

    let list = match chosen_list_id {
        None => {
            errors.push(FieldError::new("list_id", "Select a list."));
            None
        }
        Some(list_id) => {
            let found = db::find_list(&state.pool, list_id).await?;
            if found.is_none() {
                errors.push(FieldError::new("list_id", "Selected list does not exist."));
            }
            found
        }
    };

    if errors.is_empty() {
        let list = list.expect("validated above");
        match form.edit_id {
            None => {
                if db::category_name_taken(&state.pool, list.id, &name, None).await? {
                    errors.push(FieldError::new(
                        "name",
                        "A category with that name already exists in this list.",
                    ));
                } else {
                    db::insert_category(&state.pool, list.id, &name).await?;
                    return Ok(redirect_with_flash("/categories", "Category created!").into_response());
                }
            }
            Some(id) => {
                let category = db::find_category(&state.pool, id)
                    .await?
                    .ok_or(ApiError::NotFound)?;
                if db::category_name_taken(&state.pool, list.id, &name, Some(category.id)).await? {
                    errors.push(FieldError::new(
                        "name",
                        "A category with that name already exists in this list.",
                    ));
                } else {
                    db::update_category(&state.pool, category.id, list.id, &name).await?;
                    return Ok(redirect_with_flash("/categories", "Category updated!").into_response());
                }
            }
        }
    }

    let (lists, categories) = hydrate(&state, chosen_list_id).await?;
    Ok(HtmlTemplate(CategoriesTemplate {
        flash: String::new(),
        errors,
        edit_id: form.edit_id.map(|id| id.to_string()).unwrap_or_default(),
        name,
        lists,
        categories,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// single-category items page

#[derive(Template)]
#[template(path = "category_items.html")]
struct CategoryItemsTemplate {
    categories: Vec<OptionItem>,
    searched: bool,
    rows: Vec<MovieRowView>,
}

#[derive(Deserialize)]
pub(crate) struct ItemsParams {
    category_id: Option<String>,
}

/// Movies carrying one chosen category, across all lists. The soft-delete
/// flag is intentionally not consulted here.
pub(crate) async fn items(
    State(state): State<AppState>,
    Query(params): Query<ItemsParams>,
) -> Result<impl IntoResponse> {
    let chosen = parse_id(params.category_id.as_deref());
    let categories = db::all_categories(&state.pool)
        .await?
        .into_iter()
        .map(|c| {
            let label = format!("{} ({})", c.name, c.list_name);
            OptionItem::new(c.id, label, chosen == Some(c.id))
        })
        .collect();

    let mut rows = Vec::new();
    if let Some(category_id) = chosen {
        let movie_ids = db::movie_ids_in_category(&state.pool, category_id).await?;
        let movies = db::movies_by_ids(&state.pool, &movie_ids).await?;
        let list_names = db::list_names(&state.pool).await?;
        rows = projection::project(&movies, &list_names)
            .into_iter()
            .map(MovieRowView::from)
            .collect();
    }

    Ok(HtmlTemplate(CategoryItemsTemplate {
        categories,
        searched: chosen.is_some(),
        rows,
    }))
}

// ---------------------------------------------------------------------------
// intersection page

#[derive(Template)]
#[template(path = "intersect.html")]
struct IntersectTemplate {
    lists: Vec<OptionItem>,
    list_chosen: bool,
    categories: Vec<crate::http::CheckItem>,
    searched: bool,
    rows: Vec<MovieRowView>,
}

#[derive(Deserialize)]
pub(crate) struct IntersectParams {
    list_id: Option<String>,
    #[serde(default)]
    selected: Vec<i64>,
}

/// Movies carrying every ticked category of the chosen list. An empty
/// selection shows nothing; ids that are stale or belong to another list
/// are dropped before the intersection runs.
pub(crate) async fn intersect(
    State(state): State<AppState>,
    Query(params): Query<IntersectParams>,
) -> Result<impl IntoResponse> {
    let chosen_list = parse_id(params.list_id.as_deref());
    let lists = db::all_lists(&state.pool)
        .await?
        .into_iter()
        .map(|l| OptionItem::new(l.id, l.name, chosen_list == Some(l.id)))
        .collect();

    let Some(list_id) = chosen_list else {
        return Ok(HtmlTemplate(IntersectTemplate {
            lists,
            list_chosen: false,
            categories: Vec::new(),
            searched: false,
            rows: Vec::new(),
        }));
    };

    let list_categories = db::categories_for_list(&state.pool, list_id).await?;
    let valid: HashSet<i64> = list_categories.iter().map(|c| c.id).collect();
    let checked: HashSet<i64> = filter::validate_selection(&params.selected, &valid)
        .into_iter()
        .collect();

    let categories = list_categories
        .iter()
        .map(|c| crate::http::CheckItem {
            id: c.id,
            name: c.name.clone(),
            checked: checked.contains(&c.id),
        })
        .collect();

    let movies = db::movies_in_list(&state.pool, list_id).await?;
    let scope: HashSet<i64> = movies.iter().map(|m| m.id).collect();
    let candidate_ids: Vec<i64> = checked.iter().copied().collect();
    let join_rows = db::join_rows_for_categories(&state.pool, &candidate_ids).await?;

    let matched = filter::intersect(
        &params.selected,
        &valid,
        &join_rows,
        EmptySelectionPolicy::MatchNone,
        &scope,
    );

    let matched_movies: Vec<_> = movies
        .into_iter()
        .filter(|m| matched.contains(&m.id))
        .collect();
    let list_names = db::list_names(&state.pool).await?;
    let rows = projection::project(&matched_movies, &list_names)
        .into_iter()
        .map(MovieRowView::from)
        .collect();

    Ok(HtmlTemplate(IntersectTemplate {
        lists,
        list_chosen: true,
        categories,
        searched: !params.selected.is_empty(),
        rows,
    }))
}
