use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::db;
use crate::http::{redirect_with_flash, ApiError, AppState, FieldError, HtmlTemplate, Result};

const NAME_MAX_LEN: usize = 100;

#[derive(Template)]
#[template(path = "lists.html")]
struct ListsTemplate {
    flash: String,
    errors: Vec<FieldError>,
    edit_id: String,
    name: String,
    lists: Vec<ListRowView>,
}

struct ListRowView {
    id: i64,
    name: String,
}

async fn hydrate(state: &AppState) -> Result<Vec<ListRowView>> {
    let lists = db::all_lists(&state.pool).await?;
    Ok(lists
        .into_iter()
        .map(|l| ListRowView { id: l.id, name: l.name })
        .collect())
}

#[derive(Deserialize)]
pub(crate) struct ManageParams {
    flash: Option<String>,
}

pub(crate) async fn manage(
    State(state): State<AppState>,
    Query(params): Query<ManageParams>,
) -> Result<impl IntoResponse> {
    Ok(HtmlTemplate(ListsTemplate {
        flash: params.flash.unwrap_or_default(),
        errors: Vec::new(),
        edit_id: String::new(),
        name: String::new(),
        lists: hydrate(&state).await?,
    }))
}

pub(crate) async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let list = db::find_list(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HtmlTemplate(ListsTemplate {
        flash: String::new(),
        errors: Vec::new(),
        edit_id: list.id.to_string(),
        name: list.name,
        lists: hydrate(&state).await?,
    }))
}

#[derive(Deserialize)]
pub(crate) struct SaveListForm {
    edit_id: Option<i64>,
    name: String,
}

pub(crate) async fn save(
    State(state): State<AppState>,
    Form(form): Form<SaveListForm>,
) -> Result<Response> {
    let name = form.name.trim().to_string();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(FieldError::new("name", "Name must be 100 characters or fewer."));
    }

    if errors.is_empty() {
        match form.edit_id {
            None => {
                if db::list_name_taken(&state.pool, &name, None).await? {
                    errors.push(FieldError::new("name", "A list with that name already exists."));
                } else {
                    db::insert_list(&state.pool, &name).await?;
                    return Ok(redirect_with_flash("/lists", "List created!").into_response());
                }
            }
            Some(id) => {
                let list = db::find_list(&state.pool, id)
                    .await?
                    .ok_or(ApiError::NotFound)?;
                if db::list_name_taken(&state.pool, &name, Some(list.id)).await? {
                    errors.push(FieldError::new("name", "A list with that name already exists."));
                } else {
                    db::update_list_name(&state.pool, list.id, &name).await?;
                    return Ok(redirect_with_flash("/lists", "List updated!").into_response());
                }
            }
        }
    }

    Ok(HtmlTemplate(ListsTemplate {
        flash: String::new(),
        errors,
        edit_id: form.edit_id.map(|id| id.to_string()).unwrap_or_default(),
        name,
        lists: hydrate(&state).await?,
    })
    .into_response())
}
