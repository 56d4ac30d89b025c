use std::sync::Arc;

use anyhow::Context;
use askama::Template;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_macros::FromRef;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::projection::DisplayRow;

mod categories;
pub mod error;
mod home;
mod lists;
mod movies;

pub use error::ApiError;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
}

pub async fn serve(config: Config, pool: PgPool) -> anyhow::Result<()> {
    let bind_addr = config.http.bind_addr.clone();
    let upload_dir = config.storage.upload_dir.clone();

    info!("initializing router...");
    let app_state = AppState { config: Arc::new(config), pool };
    let router = Router::new()
        // pages
        .route("/", get(home::dashboard))
        .route("/lists", get(lists::manage))
        .route("/lists/:id/edit", get(lists::edit))
        .route("/lists/save", post(lists::save))
        .route("/categories", get(categories::manage))
        .route("/categories/:id/edit", get(categories::edit))
        .route("/categories/save", post(categories::save))
        .route("/categories/items", get(categories::items))
        .route("/categories/intersect", get(categories::intersect))
        .route("/movies/add", get(movies::add_form).post(movies::create))
        .route("/movies/:id/edit", get(movies::edit_form).post(movies::update))
        .route("/movies/:id/delete", post(movies::soft_delete))
        .route("/movies/:id/restore", post(movies::restore))
        .route("/movies/filter", get(movies::filter))

        // uploaded posters
        .nest_service("/uploads", ServeDir::new(upload_dir))

        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(52_428_800)),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    axum::serve(listener, router)
        .await
        .context("error running HTTP server")
}

pub(crate) struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {}", err),
            )
                .into_response(),
        }
    }
}

/// One field-level validation message, rendered next to the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// `<option>` entry for a dropdown.
#[derive(Clone, Debug)]
pub(crate) struct OptionItem {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionItem {
    pub fn new(value: impl ToString, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
            selected,
        }
    }
}

/// Checkbox entry for the per-list category pickers.
#[derive(Clone, Debug)]
pub(crate) struct CheckItem {
    pub id: i64,
    pub name: String,
    pub checked: bool,
}

/// Display row with options pre-formatted for the templates.
#[derive(Clone, Debug)]
pub(crate) struct MovieRowView {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub length: String,
    pub language: String,
    pub list_name: String,
    pub seen: &'static str,
    pub available: &'static str,
    pub deleted: bool,
    pub picture_address: String,
}

impl From<DisplayRow> for MovieRowView {
    fn from(row: DisplayRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: fmt_opt_i32(row.year),
            length: fmt_opt_i32(row.length),
            language: row.language.unwrap_or_default(),
            list_name: row.list_name,
            seen: fmt_flag(row.is_seen),
            available: fmt_flag(row.is_available),
            deleted: row.is_deleted,
            picture_address: row.picture_address.unwrap_or_default(),
        }
    }
}

/// Parses an id carried in a query string or form field. Dropdowns submit
/// an empty value for the blank option, so blank and junk both read as
/// "nothing chosen" rather than erroring.
pub(crate) fn parse_id(input: Option<&str>) -> Option<i64> {
    input.and_then(|s| s.trim().parse().ok())
}

pub(crate) fn fmt_opt_i32(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn fmt_flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

/// Redirect carrying a one-shot status message as a query parameter; the
/// target page renders it as a banner. No shared state involved.
pub(crate) fn redirect_with_flash(path: &str, flash: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{}{}flash={}",
        path,
        separator,
        urlencoding::encode(flash)
    ))
}
