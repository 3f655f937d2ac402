use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog entry. `id` and `date` are always assigned server-side; the
/// associated media blob lives in object storage under a key derived from `id`
/// and is not tracked here.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub body: String,
    pub date: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Asset {
            id: Uuid::new_v4(),
            title: title.into(),
            author: author.into(),
            body: body.into(),
            date: Utc::now(),
        }
    }
}
