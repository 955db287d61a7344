use crate::model::{ItemId, ListId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// An identifier argument was zero or negative. Caller bug; never retried.
    #[error("Id must be greater than zero (got {0})")]
    InvalidId(i64),

    /// An operation was attempted against an entity in the wrong lifecycle
    /// state, e.g. updating an entity that was never persisted.
    #[error("{0}")]
    InvalidState(String),

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    /// Foreign-key violation: an item was committed whose list does not exist.
    #[error("Item {item_id} references unknown list {list_id}")]
    UnknownList { item_id: ItemId, list_id: ListId },

    /// A committed write lost a race against another writer: the row's
    /// version changed since it was read, or the row was removed. The caller
    /// must re-check existence and retry against a fresh read.
    #[error("Concurrent modification of {entity} {id}")]
    Conflict { entity: &'static str, id: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
