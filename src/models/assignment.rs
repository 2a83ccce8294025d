//! Reading assignment models.
//!
//! An assignment ties a book to a classroom with a due date. The server
//! stamps `assigned_date` at creation time; the client checks the date
//! ordering before submitting so an impossible schedule never leaves the
//! machine.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Book;

/// A reading assigned to a classroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingAssignment {
    pub id: i64,
    pub book_id: i64,
    pub classroom_id: i64,
    pub assigned_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    /// Embedded by the list endpoint; absent on single-item responses.
    #[serde(default)]
    pub book: Option<Book>,
}

impl ReadingAssignment {
    /// Book title for display, falling back to the numeric id.
    pub fn book_label(&self) -> String {
        match &self.book {
            Some(book) => book.label(),
            None => format!("book #{}", self.book_id),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("due date {due} is earlier than the assigned date {assigned}")]
pub struct ScheduleError {
    pub assigned: NaiveDate,
    pub due: NaiveDate,
}

/// Request body for creating an assignment.
///
/// `assigned_date` is what the server will stamp (today); it is kept here
/// only so the schedule can be validated locally and is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    pub book_id: i64,
    pub classroom_id: i64,
    #[serde(skip)]
    pub assigned_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl NewAssignment {
    pub fn new(book_id: i64, classroom_id: i64, due_date: NaiveDate) -> Self {
        Self {
            book_id,
            classroom_id,
            assigned_date: Utc::now().date_naive(),
            due_date,
        }
    }

    /// Reject schedules where the due date precedes the assigned date.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.due_date < self.assigned_date {
            Err(ScheduleError {
                assigned: self.assigned_date,
                due: self.due_date,
            })
        } else {
            Ok(())
        }
    }
}
