//! Book catalog models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A book in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication date as `YYYY-MM-DD`, when known.
    pub published_at: Option<NaiveDate>,
}

impl Book {
    /// One-line display label, e.g. `Candide, Voltaire (1759-01-15)`.
    pub fn label(&self) -> String {
        match self.published_at {
            Some(date) => format!("{}, {} ({})", self.title, self.author, date),
            None => format!("{}, {}", self.title, self.author),
        }
    }
}

/// Request body for adding or updating a catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDate>,
}
