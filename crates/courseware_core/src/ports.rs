//! crates/courseware_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or
//! object-storage backends.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::{Course, Lecture, LectureSummary};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error taxonomy shared by all port operations. The web layer maps
/// each variant to exactly one HTTP status, so adapters must pick the
/// variant that matches the failure, not a catch-all.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// Malformed or missing input (maps to 400).
    #[error("Invalid input: {0}")]
    Validation(String),
    /// No usable principal on the request (maps to 401).
    #[error("Authentication required")]
    Unauthorized,
    /// The principal lacks entitlement or role (maps to 403). Distinct
    /// from `NotFound` so denial never reveals whether a course exists.
    #[error("Access denied: {0}")]
    Forbidden(String),
    /// The referenced row does not exist (maps to 404).
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The object-store call failed or timed out (maps to 502). The
    /// client retries by resubmitting the whole upload.
    #[error("Object storage failure: {0}")]
    Storage(String),
    /// Anything else (maps to 500).
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persistent catalog state: courses, lectures, entitlements, and the
/// per-(user, course) completion ledger.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Courses and entitlements ---
    async fn get_course(&self, course_id: Uuid) -> PortResult<Course>;

    /// Whether an entitlement row exists for (user, course). Entitlements
    /// are granted by out-of-scope flows; this core only reads them.
    async fn has_entitlement(&self, user_id: Uuid, course_id: Uuid) -> PortResult<bool>;

    // --- Lecture directory ---
    /// Lectures of a course in creation order, metadata only.
    async fn list_lectures(&self, course_id: Uuid) -> PortResult<Vec<LectureSummary>>;

    async fn get_lecture(&self, lecture_id: Uuid) -> PortResult<Lecture>;

    /// Persists a lecture row. Called only after its blob is confirmed
    /// stored; the row carries the resolved retrieval URL from day one.
    async fn insert_lecture(
        &self,
        course_id: Uuid,
        title: &str,
        description: &str,
        video_url: &str,
        storage_key: &str,
    ) -> PortResult<Lecture>;

    /// Removes the lecture row and every completion-ledger entry that
    /// references it. Returns the deleted lecture so the caller can
    /// clean up the backing blob.
    async fn delete_lecture(&self, lecture_id: Uuid) -> PortResult<Lecture>;

    // --- Progress ledger ---
    /// Records a completion. Idempotent: marking an already-completed
    /// lecture is a no-op success. Fails with `NotFound` when the
    /// lecture does not belong to the course.
    async fn mark_complete(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        lecture_id: Uuid,
    ) -> PortResult<()>;

    /// The raw completed set for (user, course). Empty set when no row
    /// exists yet.
    async fn completed_lectures(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> PortResult<HashSet<Uuid>>;
}

/// Durable blob storage, content-addressed by caller-generated key. The
/// adapter owns the bytes exclusively; lectures hold only the key and
/// the URL derived from it.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores the blob under `key`. The blob must not be observable
    /// under its final key until the write has fully succeeded.
    async fn put(&self, key: &str, content_type: &str, bytes: Bytes) -> PortResult<()>;

    /// Removes the blob. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> PortResult<()>;

    /// The stable retrieval URL for a stored key.
    fn url_for(&self, key: &str) -> String;
}
