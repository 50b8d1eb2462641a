//! crates/courseware_core/src/access.rs
//!
//! The access gate: pure allow/deny decisions over a request principal.
//! Persistence lookups (entitlement rows) happen in the caller; the gate
//! itself is side-effect free so it can be tested without any store.

use crate::domain::{Course, Principal, Role};
use crate::ports::{PortError, PortResult};

/// Decides whether `principal` may read a course's lecture content.
///
/// The owner role bypasses entitlement checks entirely; learners need an
/// entitlement row for the course. Denial is `Forbidden`, never
/// `NotFound`: the caller resolves existence before or after the gate,
/// so a denied learner learns nothing about what exists.
pub fn can_access_course(principal: &Principal, entitled: bool) -> PortResult<()> {
    match principal.role {
        Role::Owner => Ok(()),
        Role::Learner if entitled => Ok(()),
        Role::Learner => Err(PortError::Forbidden(
            "no entitlement for this course".to_string(),
        )),
    }
}

/// Mutations (upload, delete) are restricted to the course owner.
pub fn require_owner(principal: &Principal, course: &Course) -> PortResult<()> {
    if principal.role == Role::Owner && principal.user_id == course.owner_id {
        Ok(())
    } else {
        Err(PortError::Forbidden(
            "only the course owner may modify lectures".to_string(),
        ))
    }
}

/// Progress rows belong to one learner. A learner may only touch their
/// own ledger; the owner role may read any learner's.
pub fn can_touch_progress(principal: &Principal, subject_user_id: uuid::Uuid) -> PortResult<()> {
    if principal.user_id == subject_user_id || principal.role == Role::Owner {
        Ok(())
    } else {
        Err(PortError::Forbidden(
            "progress belongs to another user".to_string(),
        ))
    }
}
