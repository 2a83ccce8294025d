//! Submitted summaries and their review lifecycle.

// Allow dead code: response fields retained to mirror the API payloads
#![allow(dead_code)]

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Review status of a submitted summary.
/// The server spells pending as `en_attente`; kept as-is on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "validated")]
    Validated,
    #[serde(rename = "rejected")]
    Rejected,
}

impl ReadingStatus {
    pub fn display(&self) -> &'static str {
        match self {
            ReadingStatus::Pending => "pending",
            ReadingStatus::Validated => "validated",
            ReadingStatus::Rejected => "rejected",
        }
    }
}

/// A student's submitted summary, as the student sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReading {
    pub id: i64,
    /// Present on the submit response; the "my readings" list omits it
    /// since the caller is the owner.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub assignment_id: i64,
    pub summary: String,
    pub status: ReadingStatus,
    pub submitted_at: NaiveDateTime,
    #[serde(default)]
    pub validated_at: Option<NaiveDateTime>,
}

/// Request body for submitting a summary.
#[derive(Debug, Clone, Serialize)]
pub struct NewReading {
    pub assignment_id: i64,
    pub summary: String,
}

/// A submission in the professor's review queue, with the student and
/// assignment context the server joins in. Every nested piece is optional
/// because the server tolerates dangling references.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingReview {
    pub id: i64,
    pub assignment_id: i64,
    /// The review queue carries the owner; the per-student submission
    /// history omits it because the caller already named the student.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub summary: String,
    pub status: ReadingStatus,
    pub submitted_at: NaiveDateTime,
    #[serde(default)]
    pub validated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub student: Option<super::Student>,
    #[serde(default)]
    pub assignment: Option<ReviewAssignment>,
}

impl ReadingReview {
    pub fn student_label(&self) -> String {
        match (&self.student, self.user_id) {
            (Some(student), _) => student.full_name(),
            (None, Some(user_id)) => format!("student #{}", user_id),
            (None, None) => "-".to_string(),
        }
    }

    pub fn book_label(&self) -> String {
        self.assignment
            .as_ref()
            .and_then(|a| a.book.as_ref())
            .map(|b| format!("{}, {}", b.title, b.author))
            .unwrap_or_else(|| format!("assignment #{}", self.assignment_id))
    }

    pub fn classroom_label(&self) -> String {
        self.assignment
            .as_ref()
            .and_then(|a| a.classroom.as_ref())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAssignment {
    pub id: i64,
    #[serde(default)]
    pub book: Option<ReviewBook>,
    #[serde(default)]
    pub classroom: Option<ReviewClassroom>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewBook {
    pub id: i64,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewClassroom {
    pub id: i64,
    pub name: String,
}

/// Server acknowledgement of a validate/reject decision.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingDecision {
    pub id: i64,
    pub status: ReadingStatus,
    pub validated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spelling() {
        let pending: ReadingStatus = serde_json::from_str("\"en_attente\"").unwrap();
        assert_eq!(pending, ReadingStatus::Pending);
        assert_eq!(pending.display(), "pending");
        assert_eq!(
            serde_json::to_string(&ReadingStatus::Validated).unwrap(),
            "\"validated\""
        );
    }

    #[test]
    fn test_parse_student_reading() {
        let json = r#"{
            "id": 12, "user_id": 7, "assignment_id": 9,
            "summary": "Un conte philosophique.",
            "status": "en_attente",
            "submitted_at": "2025-03-20T14:00:00",
            "validated_at": null
        }"#;
        let reading: StudentReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.status, ReadingStatus::Pending);
        assert!(reading.validated_at.is_none());
    }

    #[test]
    fn test_parse_own_reading_without_owner_field() {
        // The "my readings" list omits user_id entirely
        let json = r#"{
            "id": 12, "assignment_id": 9,
            "summary": "Un conte philosophique.",
            "status": "validated",
            "submitted_at": "2025-03-20T14:00:00",
            "validated_at": "2025-03-21T09:00:00"
        }"#;
        let reading: StudentReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.user_id, None);
        assert_eq!(reading.status, ReadingStatus::Validated);
    }

    #[test]
    fn test_parse_review_with_context() {
        let json = r#"{
            "id": 12, "user_id": 7, "assignment_id": 9,
            "summary": "Un conte philosophique.",
            "status": "validated",
            "submitted_at": "2025-03-20T14:00:00",
            "validated_at": "2025-03-21T09:00:00",
            "student": {"id": 7, "first_name": "Tom", "last_name": "Sawyer"},
            "assignment": {
                "id": 9,
                "book": {"id": 2, "title": "Candide", "author": "Voltaire"},
                "classroom": {"id": 4, "name": "Terminale L"}
            }
        }"#;
        let review: ReadingReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.student_label(), "Tom Sawyer");
        assert_eq!(review.book_label(), "Candide, Voltaire");
        assert_eq!(
            review.assignment.unwrap().classroom.unwrap().name,
            "Terminale L"
        );
    }

    #[test]
    fn test_parse_submission_history_entry() {
        // The per-student history names neither the owner nor the student;
        // the caller already knows who was asked about
        let json = r#"{
            "id": 12, "assignment_id": 9,
            "summary": "Un conte philosophique.",
            "status": "en_attente",
            "submitted_at": "2025-03-20T14:00:00",
            "validated_at": null,
            "assignment": {
                "id": 9,
                "book": {"id": 2, "title": "Candide", "author": "Voltaire"},
                "classroom": {"id": 4, "name": "Terminale L"}
            }
        }"#;
        let entry: ReadingReview = serde_json::from_str(json).unwrap();
        assert_eq!(entry.user_id, None);
        assert_eq!(entry.book_label(), "Candide, Voltaire");
        assert_eq!(entry.student_label(), "-");
    }

    #[test]
    fn test_parse_review_with_dangling_references() {
        let json = r#"{
            "id": 12, "user_id": 7, "assignment_id": 9,
            "summary": "…", "status": "rejected",
            "submitted_at": "2025-03-20T14:00:00",
            "student": null, "assignment": null
        }"#;
        let review: ReadingReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.student_label(), "student #7");
        assert_eq!(review.book_label(), "assignment #9");
    }
}
