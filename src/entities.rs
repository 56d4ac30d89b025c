use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct List {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
}

/// Category together with the name of its owning list, for management pages.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct CategoryWithList {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
    pub list_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, FromRow)]
pub struct Movie {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub length: Option<i32>,
    pub language: Option<String>,
    pub year: Option<i32>,
    pub is_available: Option<bool>,
    pub is_seen: Option<bool>,
    pub description: Option<String>,
    pub picture_address: Option<String>,
    pub local_address: Option<String>,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
}

/// Join row attaching one category to one movie.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct CategorizedItem {
    pub id: i64,
    pub movie_id: i64,
    pub category_id: i64,
}

/// Scalar movie fields as submitted by the categorize form, before an id exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieDraft {
    pub list_id: i64,
    pub title: String,
    pub length: Option<i32>,
    pub language: Option<String>,
    pub year: Option<i32>,
    pub is_available: Option<bool>,
    pub is_seen: Option<bool>,
    pub description: Option<String>,
    pub picture_address: Option<String>,
    pub local_address: Option<String>,
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    pub fn movie(id: i64, list_id: i64, title: &str) -> Movie {
        Movie {
            id,
            list_id,
            title: title.to_string(),
            length: None,
            language: None,
            year: None,
            is_available: None,
            is_seen: None,
            description: None,
            picture_address: None,
            local_address: None,
            is_deleted: false,
            created_at: NaiveDateTime::default(),
        }
    }
}
