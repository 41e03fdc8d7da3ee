//! Book domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Book record owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub status: String,
    pub genre: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[serde(alias = "Title")]
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
    #[serde(default, alias = "Author")]
    #[validate(length(max = 255))]
    pub author: String,
    #[serde(default, alias = "Status")]
    #[validate(length(max = 64))]
    pub status: String,
    #[serde(default, alias = "Genre")]
    #[validate(length(max = 64))]
    pub genre: String,
}

impl CreateBookRequest {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            status: self.status.trim().to_string(),
            genre: self.genre.trim().to_string(),
        }
    }
}

/// Update book request
///
/// Absent or blank fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[serde(default, alias = "Title")]
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[serde(default, alias = "Author")]
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[serde(default, alias = "Status")]
    #[validate(length(max = 64))]
    pub status: Option<String>,
    #[serde(default, alias = "Genre")]
    #[validate(length(max = 64))]
    pub genre: Option<String>,
}

impl UpdateBookRequest {
    /// Trim every field and turn blank ones into `None`.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: keep(self.title),
            author: keep(self.author),
            status: keep(self.status),
            genre: keep(self.genre),
        }
    }
}
