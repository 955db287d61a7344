//! # Service Layer
//!
//! Business rules for the two entities, one module each: [`lists`] and
//! [`items`]. Every public function is one logical unit of work — validate
//! the arguments, stage mutations on the context, commit once, return. All
//! validation failures are raised before anything is staged, so a rejected
//! call can never leave a partial write behind.
//!
//! Functions are generic over [`TodoContext`](crate::store::TodoContext) so
//! the same logic runs against the file-backed store in production and the
//! in-memory store in tests.

use crate::error::{Result, TodoError};

pub mod items;
pub mod lists;

pub(crate) fn ensure_valid_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(TodoError::InvalidId(id));
    }
    Ok(())
}

pub(crate) fn ensure_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TodoError::EmptyField("title"));
    }
    Ok(())
}

pub(crate) fn ensure_persisted(kind: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(TodoError::InvalidState(format!(
            "Cannot update {} that has not been persisted: id must be greater than zero (got {}).",
            kind, id
        )));
    }
    Ok(())
}
