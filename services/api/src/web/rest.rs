//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::ingest::{self, UploadedFile};
use crate::web::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use courseware_core::access;
use courseware_core::domain::{Course, Lecture, Principal, Role};
use courseware_core::ports::PortError;
use courseware_core::progress;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_lectures_handler,
        create_lecture_handler,
        get_lecture_handler,
        delete_lecture_handler,
        get_progress_handler,
        mark_complete_handler,
    ),
    components(
        schemas(LectureSummaryBody, LectureBody, ProgressBody, MessageBody)
    ),
    tags(
        (name = "Courseware API", description = "Lecture content pipeline and progress tracking.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Metadata-only lecture entry, as returned by course listings.
#[derive(Serialize, ToSchema)]
pub struct LectureSummaryBody {
    pub id: Uuid,
    pub title: String,
}

/// A full lecture, including its playable video URL.
#[derive(Serialize, ToSchema)]
pub struct LectureBody {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
}

impl From<Lecture> for LectureBody {
    fn from(l: Lecture) -> Self {
        Self {
            id: l.id,
            course_id: l.course_id,
            title: l.title,
            description: l.description,
            video_url: l.video_url,
        }
    }
}

/// A user's progress through one course.
#[derive(Serialize, ToSchema)]
pub struct ProgressBody {
    pub percentage: u8,
    pub completed_lecture_ids: Vec<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

//=========================================================================================
// Shared Gate Helpers
//=========================================================================================

/// Resolves the course and runs the access gate for content reads.
/// Unknown course is 404 for everyone (there is nothing to leak); an
/// existing course without entitlement is 403.
async fn gated_course(
    state: &AppState,
    principal: &Principal,
    course_id: Uuid,
) -> Result<Course, ApiError> {
    let course = state.catalog.get_course(course_id).await?;
    let entitled = match principal.role {
        Role::Owner => true,
        Role::Learner => {
            state
                .catalog
                .has_entitlement(principal.user_id, course_id)
                .await?
        }
    };
    access::can_access_course(principal, entitled)?;
    Ok(course)
}

async fn progress_body(
    state: &AppState,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<ProgressBody, ApiError> {
    let completed = state.catalog.completed_lectures(user_id, course_id).await?;
    let current: Vec<Uuid> = state
        .catalog
        .list_lectures(course_id)
        .await?
        .into_iter()
        .map(|l| l.id)
        .collect();

    let p = progress::compute(&completed, &current);
    let mut ids: Vec<Uuid> = p.completed_lecture_ids.into_iter().collect();
    ids.sort();
    Ok(ProgressBody {
        percentage: p.percentage,
        completed_lecture_ids: ids,
    })
}

//=========================================================================================
// Lecture Directory Handlers
//=========================================================================================

/// List a course's lectures in creation order (metadata only).
#[utoipa::path(
    get,
    path = "/courses/{course_id}/lectures",
    params(("course_id" = Uuid, Path, description = "The course to list.")),
    responses(
        (status = 200, description = "Ordered lecture summaries", body = [LectureSummaryBody]),
        (status = 401, description = "No principal context"),
        (status = 403, description = "Principal lacks entitlement"),
        (status = 404, description = "Course does not exist")
    )
)]
pub async fn list_lectures_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    gated_course(&state, &principal, course_id).await?;

    let lectures: Vec<LectureSummaryBody> = state
        .catalog
        .list_lectures(course_id)
        .await?
        .into_iter()
        .map(|l| LectureSummaryBody { id: l.id, title: l.title })
        .collect();

    Ok(Json(lectures))
}

/// Fetch one lecture including its video URL.
#[utoipa::path(
    get,
    path = "/lectures/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "The lecture to fetch.")),
    responses(
        (status = 200, description = "The lecture", body = LectureBody),
        (status = 403, description = "Principal lacks entitlement for the owning course"),
        (status = 404, description = "Lecture does not exist")
    )
)]
pub async fn get_lecture_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(lecture_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lecture = state.catalog.get_lecture(lecture_id).await?;
    gated_course(&state, &principal, lecture.course_id).await?;
    Ok(Json(LectureBody::from(lecture)))
}

/// Delete a lecture (owner only). Ledger entries referencing it are
/// purged with the row; the backing blob is removed best-effort.
#[utoipa::path(
    delete,
    path = "/lectures/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "The lecture to delete.")),
    responses(
        (status = 200, description = "Lecture deleted", body = MessageBody),
        (status = 403, description = "Principal is not the course owner"),
        (status = 404, description = "Lecture does not exist")
    )
)]
pub async fn delete_lecture_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(lecture_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lecture = state.catalog.get_lecture(lecture_id).await?;
    let course = state.catalog.get_course(lecture.course_id).await?;
    access::require_owner(&principal, &course)?;

    let deleted = state.catalog.delete_lecture(lecture_id).await?;

    // Metadata is gone; a stranded blob is waste, not an inconsistency.
    if let Err(e) = state.blobs.delete(&deleted.storage_key).await {
        warn!(key = %deleted.storage_key, "failed to delete backing blob: {:?}", e);
    }

    Ok(Json(MessageBody { message: "lecture deleted".to_string() }))
}

//=========================================================================================
// Upload Ingestion Handler
//=========================================================================================

/// Upload a new lecture video (owner only).
///
/// Accepts multipart/form-data with `title`, `description`, and `file`
/// parts. The lecture row is persisted only after the blob is durably
/// stored, so a failed upload leaves the directory unchanged.
#[utoipa::path(
    post,
    path = "/courses/{course_id}/lectures",
    request_body(content_type = "multipart/form-data", description = "title, description, and the video file."),
    params(("course_id" = Uuid, Path, description = "The course to add the lecture to.")),
    responses(
        (status = 201, description = "Lecture created", body = LectureBody),
        (status = 400, description = "Missing or empty file/fields"),
        (status = 403, description = "Principal is not the course owner"),
        (status = 404, description = "Course does not exist"),
        (status = 502, description = "Object storage failure; retry the whole upload")
    )
)]
pub async fn create_lecture_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.catalog.get_course(course_id).await?;
    access::require_owner(&principal, &course)?;

    let mut title = String::new();
    let mut description = String::new();
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PortError::Validation(format!("failed to read multipart data: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                title = field.text().await.map_err(|e| {
                    PortError::Validation(format!("failed to read 'title': {}", e))
                })?;
            }
            Some("description") => {
                description = field.text().await.map_err(|e| {
                    PortError::Validation(format!("failed to read 'description': {}", e))
                })?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    PortError::Validation(format!("failed to read file bytes: {}", e))
                })?;
                file = Some(UploadedFile { file_name, content_type, bytes });
            }
            _ => {}
        }
    }

    let lecture = ingest::ingest_lecture(
        state.catalog.as_ref(),
        state.blobs.as_ref(),
        course_id,
        &title,
        &description,
        file,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(LectureBody::from(lecture))))
}

//=========================================================================================
// Progress Ledger Handlers
//=========================================================================================

/// A user's progress through a course, recomputed from the current
/// lecture directory on every read.
#[utoipa::path(
    get,
    path = "/users/{user_id}/courses/{course_id}/progress",
    params(
        ("user_id" = Uuid, Path, description = "The learner."),
        ("course_id" = Uuid, Path, description = "The course.")
    ),
    responses(
        (status = 200, description = "Current progress", body = ProgressBody),
        (status = 403, description = "Principal may not read this user's progress"),
        (status = 404, description = "Course does not exist")
    )
)]
pub async fn get_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path((user_id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    access::can_touch_progress(&principal, user_id)?;
    gated_course(&state, &principal, course_id).await?;

    Ok(Json(progress_body(&state, user_id, course_id).await?))
}

/// Mark a lecture complete. Idempotent: re-marking is a success, not an
/// error.
#[utoipa::path(
    post,
    path = "/users/{user_id}/courses/{course_id}/lectures/{lecture_id}/complete",
    params(
        ("user_id" = Uuid, Path, description = "The learner."),
        ("course_id" = Uuid, Path, description = "The course."),
        ("lecture_id" = Uuid, Path, description = "The completed lecture.")
    ),
    responses(
        (status = 200, description = "Recorded; current progress", body = ProgressBody),
        (status = 403, description = "Principal may not modify this user's progress"),
        (status = 404, description = "Lecture does not belong to the course")
    )
)]
pub async fn mark_complete_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path((user_id, course_id, lecture_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    access::can_touch_progress(&principal, user_id)?;
    gated_course(&state, &principal, course_id).await?;

    state
        .catalog
        .mark_complete(user_id, course_id, lecture_id)
        .await?;

    Ok(Json(progress_body(&state, user_id, course_id).await?))
}
