//! # Domain Model
//!
//! The two entities of the tracker: [`TodoList`] and [`TodoItem`], related by
//! an explicit foreign key (`TodoItem::list_id`). There are no navigation
//! properties — fetches that need the other side of the relationship return
//! [`ListWithItems`] or [`ItemWithList`] instead, so a caller can always tell
//! whether related rows were loaded.
//!
//! ## Identity
//!
//! Ids are positive integers assigned by the store when an entity is first
//! staged for insertion. An id of `0` (the default) marks an entity that has
//! not been persisted yet; negative ids never occur in stored data and are
//! rejected by the service layer.
//!
//! ## The derived completion flag
//!
//! `TodoItem::is_completed` is denormalized from `status`: it is `true`
//! exactly when `status == Some(ItemStatus::Completed)`. The service layer
//! recomputes it on every add and update, so a caller-supplied value never
//! survives. It is stored (rather than computed on read) so listings can
//! filter on it without knowing the status enum.
//!
//! ## Versioning
//!
//! Each row carries a `version` counter managed by the store: set to 1 on
//! insert and bumped on every committed update. An update staged with a stale
//! version fails the commit with a conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ListId = i64;
pub type ItemId = i64;

/// Progress of a single item. Absent status means "unspecified" and is
/// treated as not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    /// Store-assigned identifier; `0` means "not yet persisted".
    #[serde(default)]
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Hidden lists are suppressed from default views but otherwise behave
    /// like any other list.
    #[serde(default)]
    pub is_hidden: bool,
    /// Row version for optimistic-concurrency detection. Store-managed.
    #[serde(default)]
    pub version: u64,
}

impl TodoList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            is_hidden: false,
            version: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Store-assigned identifier; `0` means "not yet persisted".
    #[serde(default)]
    pub id: ItemId,
    /// Foreign key to the owning list. Must resolve to an existing list row
    /// by the time the item is committed.
    pub list_id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    /// Derived from `status`; recomputed on every add/update.
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Row version for optimistic-concurrency detection. Store-managed.
    #[serde(default)]
    pub version: u64,
}

impl TodoItem {
    pub fn new(list_id: ListId, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            list_id,
            title: title.into(),
            description: None,
            status: None,
            is_completed: false,
            creation_date: Some(Utc::now()),
            due_date: None,
            version: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self.derive_completed();
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Recompute the denormalized completion flag from `status`.
    pub fn derive_completed(&mut self) {
        self.is_completed = self.status == Some(ItemStatus::Completed);
    }
}

/// A list together with its items, returned by fetches that eager-load the
/// relationship.
#[derive(Debug, Clone)]
pub struct ListWithItems {
    pub list: TodoList,
    pub items: Vec<TodoItem>,
}

/// An item together with its owning list.
#[derive(Debug, Clone)]
pub struct ItemWithList {
    pub item: TodoItem,
    pub list: TodoList,
}
