//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CatalogStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courseware_core::domain::{Course, Lecture, LectureSummary};
use courseware_core::ports::{CatalogStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `CatalogStore` port.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Creates a new `PgCatalog`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct CourseRecord {
    id: Uuid,
    title: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}
impl CourseRecord {
    fn to_domain(self) -> Course {
        Course {
            id: self.id,
            title: self.title,
            owner_id: self.owner_id,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct LectureRecord {
    id: Uuid,
    course_id: Uuid,
    title: String,
    description: String,
    video_url: String,
    storage_key: String,
    position: i32,
    created_at: DateTime<Utc>,
}
impl LectureRecord {
    fn to_domain(self) -> Lecture {
        Lecture {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            storage_key: self.storage_key,
            position: self.position,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct LectureSummaryRecord {
    id: Uuid,
    title: String,
}
impl LectureSummaryRecord {
    fn to_domain(self) -> LectureSummary {
        LectureSummary { id: self.id, title: self.title }
    }
}

const LECTURE_COLUMNS: &str =
    "id, course_id, title, description, video_url, storage_key, position, created_at";

//=========================================================================================
// `CatalogStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn get_course(&self, course_id: Uuid) -> PortResult<Course> {
        let record = sqlx::query_as::<_, CourseRecord>(
            "SELECT id, title, owner_id, created_at FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?
        .ok_or_else(|| PortError::NotFound(format!("Course {} not found", course_id)))?;

        Ok(record.to_domain())
    }

    async fn has_entitlement(&self, user_id: Uuid, course_id: Uuid) -> PortResult<bool> {
        let entitled: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM entitlements WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(entitled)
    }

    async fn list_lectures(&self, course_id: Uuid) -> PortResult<Vec<LectureSummary>> {
        let records = sqlx::query_as::<_, LectureSummaryRecord>(
            "SELECT id, title FROM lectures WHERE course_id = $1 ORDER BY position ASC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_lecture(&self, lecture_id: Uuid) -> PortResult<Lecture> {
        let record = sqlx::query_as::<_, LectureRecord>(&format!(
            "SELECT {} FROM lectures WHERE id = $1",
            LECTURE_COLUMNS
        ))
        .bind(lecture_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?
        .ok_or_else(|| PortError::NotFound(format!("Lecture {} not found", lecture_id)))?;

        Ok(record.to_domain())
    }

    async fn insert_lecture(
        &self,
        course_id: Uuid,
        title: &str,
        description: &str,
        video_url: &str,
        storage_key: &str,
    ) -> PortResult<Lecture> {
        // Position is assigned per course so listings come back in
        // creation order, stable across calls.
        let record = sqlx::query_as::<_, LectureRecord>(&format!(
            "INSERT INTO lectures (id, course_id, title, description, video_url, storage_key, position) \
             VALUES ($1, $2, $3, $4, $5, $6, \
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM lectures WHERE course_id = $2)) \
             RETURNING {}",
            LECTURE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(title)
        .bind(description)
        .bind(video_url)
        .bind(storage_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn delete_lecture(&self, lecture_id: Uuid) -> PortResult<Lecture> {
        // Completion-ledger rows go with it via ON DELETE CASCADE.
        let record = sqlx::query_as::<_, LectureRecord>(&format!(
            "DELETE FROM lectures WHERE id = $1 RETURNING {}",
            LECTURE_COLUMNS
        ))
        .bind(lecture_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?
        .ok_or_else(|| PortError::NotFound(format!("Lecture {} not found", lecture_id)))?;

        Ok(record.to_domain())
    }

    async fn mark_complete(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        lecture_id: Uuid,
    ) -> PortResult<()> {
        let belongs: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM lectures WHERE id = $1 AND course_id = $2)",
        )
        .bind(lecture_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !belongs {
            return Err(PortError::NotFound(format!(
                "Lecture {} not found in course {}",
                lecture_id, course_id
            )));
        }

        // Idempotent: re-marking an already-completed lecture is a no-op.
        sqlx::query(
            "INSERT INTO lecture_completions (user_id, course_id, lecture_id) \
             VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(lecture_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(())
    }

    async fn completed_lectures(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> PortResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT lecture_id FROM lecture_completions WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(ids.into_iter().collect())
    }
}
