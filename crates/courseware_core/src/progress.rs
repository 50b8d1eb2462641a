//! crates/courseware_core/src/progress.rs
//!
//! Progress-percentage math. The ledger stores only raw completed ids;
//! the percentage is derived here on every read so the denominator always
//! reflects the current lecture directory.

use crate::domain::CourseProgress;
use std::collections::HashSet;
use uuid::Uuid;

/// Derives a user's progress from their raw completed set and the
/// course's current lecture ids.
///
/// Completed ids are intersected with the live directory, so stale
/// entries left behind by a deleted lecture can never inflate the
/// number. Rounding is half-up (2 of 3 → 67). A course with no lectures
/// is 0%, not a division by zero.
pub fn compute(completed: &HashSet<Uuid>, current_lectures: &[Uuid]) -> CourseProgress {
    let live: HashSet<Uuid> = current_lectures.iter().copied().collect();
    let completed_lecture_ids: HashSet<Uuid> =
        completed.intersection(&live).copied().collect();

    let percentage = if live.is_empty() {
        0
    } else {
        (completed_lecture_ids.len() as f64 * 100.0 / live.len() as f64).round() as u8
    };

    CourseProgress { completed_lecture_ids, percentage }
}
