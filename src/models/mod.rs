//! Data models for the reading tracker.
//!
//! This module contains all the data structures exchanged with the
//! tracker API:
//!
//! - `UserProfile`, `Student`, `Role`: accounts and roles
//! - `Book`: the reading catalog
//! - `Classroom`: classes and their rosters
//! - `ReadingAssignment`: readings assigned to a classroom with a due date
//! - `StudentReading`, `ReadingReview`: submitted summaries and their review

pub mod assignment;
pub mod book;
pub mod classroom;
pub mod reading;
pub mod user;

pub use assignment::{NewAssignment, ReadingAssignment, ScheduleError};
pub use book::{Book, NewBook};
pub use classroom::Classroom;
pub use reading::{
    NewReading, ReadingDecision, ReadingReview, ReadingStatus, ReviewAssignment, StudentReading,
};
pub use user::{Credentials, RegisterRequest, Role, Student, UserProfile};
