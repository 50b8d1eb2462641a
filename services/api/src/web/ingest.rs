//! services/api/src/web/ingest.rs
//!
//! The upload ingestion pipeline: validate the multipart file, derive a
//! unique storage key, push the blob to the object store, and only then
//! persist the lecture row. Blob-storage success is the commit point; on
//! any earlier failure nothing is persisted and the client retries by
//! resubmitting the whole request.

use bytes::Bytes;
use courseware_core::domain::Lecture;
use courseware_core::ports::{CatalogStore, ObjectStore, PortError, PortResult};
use tracing::info;
use uuid::Uuid;

/// One file part pulled out of the multipart request.
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Runs the pipeline for one lecture upload.
pub async fn ingest_lecture(
    catalog: &dyn CatalogStore,
    blobs: &dyn ObjectStore,
    course_id: Uuid,
    title: &str,
    description: &str,
    file: Option<UploadedFile>,
) -> PortResult<Lecture> {
    if title.trim().is_empty() {
        return Err(PortError::Validation("title must not be empty".to_string()));
    }
    let file = file.ok_or_else(|| {
        PortError::Validation("multipart form must include a 'file' part".to_string())
    })?;
    if file.bytes.is_empty() {
        return Err(PortError::Validation(
            "uploaded file must not be empty".to_string(),
        ));
    }

    let key = storage_key_for(&file.file_name);

    // The one slow call. Concurrent uploads cannot collide: every key
    // carries a fresh v4 UUID. MIME types are stored as given, no sniffing.
    blobs.put(&key, &file.content_type, file.bytes).await?;

    let lecture = catalog
        .insert_lecture(course_id, title, description, &blobs.url_for(&key), &key)
        .await?;

    info!(
        lecture_id = %lecture.id,
        course_id = %course_id,
        key = %key,
        "lecture ingested"
    );
    Ok(lecture)
}

/// `lectures/{uuid}-{sanitized original name}`: unpredictable to clients
/// and practically collision-free.
fn storage_key_for(original_file_name: &str) -> String {
    format!("lectures/{}-{}", Uuid::new_v4(), sanitize_file_name(original_file_name))
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}
