use std::borrow::Cow;
use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::error::FilmotekaError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request path not found")]
    NotFound,

    #[error("error in the request body")]
    UnprocessableEntity {
        errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
    },

    #[error("an error occurred with the database: {0}")]
    Db(#[from] sqlx::Error),

    #[error("image processing failed: {0}")]
    Image(#[from] FilmotekaError),

    #[error("an internal server error occurred: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    /// Fallback for structurally broken submissions. Field-level validation
    /// failures are rendered back into the submitting form instead.
    pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = HashMap::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::UnprocessableEntity { errors: error_map }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Db(_) | Self::Image(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UnprocessableEntity { errors } => {
                let mut items = String::new();
                for (field, messages) in &errors {
                    for message in messages {
                        items.push_str(&format!("<li>{}: {}</li>", field, message));
                    }
                }
                let body = format!("<h1>Invalid request</h1><ul>{}</ul>", items);
                return (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response();
            }

            Self::NotFound => {
                return (
                    StatusCode::NOT_FOUND,
                    Html("<h1>Not found</h1>".to_string()),
                )
                    .into_response();
            }

            Self::Db(ref e) => {
                error!("Database error: {:?}", e);
            }

            Self::Image(ref e) => {
                error!("Image error: {:?}", e);
            }

            Self::Anyhow(ref e) => {
                error!("Generic error: {:?}", e);
            }
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
