//! crates/courseware_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// A course: an ordered collection of lectures owned by one user.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A single video lecture. A row exists only once its blob is durably
/// stored, so `video_url` and `storage_key` are never empty.
#[derive(Debug, Clone)]
pub struct Lecture {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub storage_key: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Metadata-only view of a lecture, used for course listings.
#[derive(Debug, Clone)]
pub struct LectureSummary {
    pub id: Uuid,
    pub title: String,
}

/// The role the authenticated actor carries for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Learner,
}

/// The authenticated actor making a request. Built per request by the
/// web layer; there is no ambient session state.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

/// A user's completion state for one course, derived on every read from
/// the current lecture directory.
#[derive(Debug, Clone)]
pub struct CourseProgress {
    pub completed_lecture_ids: HashSet<Uuid>,
    pub percentage: u8,
}
