//! # Storage Layer
//!
//! This module defines the persistence context for taskling. The
//! [`TodoContext`] trait allows the service layer to work with different
//! storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemoryContext` (no filesystem needed)
//! - Allow **future backends** (database, cloud, etc.) without changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Unit of Work
//!
//! Unlike a write-through store, a context *stages* mutations: `add_*`,
//! `update_*` and `remove_*` record intent, and nothing becomes durable until
//! [`TodoContext::commit`] applies the whole staged set as one atomic unit.
//! A failed commit leaves the committed state untouched and discards the
//! staged set; callers retry against a fresh read.
//!
//! Commit enforces the relational rules so no backend can get them wrong:
//! - **Optimistic concurrency**: an update whose row version no longer
//!   matches (or whose row was concurrently removed) fails with
//!   [`TodoError::Conflict`](crate::error::TodoError::Conflict).
//! - **Referential integrity**: an item whose `list_id` does not resolve
//!   fails with `UnknownList`; removing a list cascade-deletes its items
//!   inside the same unit of work.
//!
//! ## Identity
//!
//! `add_list`/`add_item` assign the id (and initial version) at staging time
//! from the store's monotonic counters. Counters never run backwards, so ids
//! are never reused — not even when a commit fails and the staged insert is
//! discarded.
//!
//! ## Implementations
//!
//! - [`fs::FileContext`]: production storage, a single JSON data file
//!   written atomically (write tmp, rename) on every successful commit
//! - [`memory::MemoryContext`]: in-memory storage for tests, no persistence

use crate::error::Result;
use crate::model::{ItemId, ListId, TodoItem, TodoList};

pub mod fs;
pub mod memory;
mod tables;

/// The persistence context: queries over committed state plus staged
/// mutations applied atomically by [`commit`](TodoContext::commit).
///
/// A context is a shared, stateful resource — one context per logical
/// operation or request. The `&mut self` receivers on mutating methods make
/// concurrent misuse unrepresentable.
pub trait TodoContext {
    /// All committed lists, in id order. Items are not loaded.
    fn lists(&self) -> Result<Vec<TodoList>>;

    /// A single committed list, or `None` if no row matches.
    fn find_list(&self, id: ListId) -> Result<Option<TodoList>>;

    /// All committed items, in id order.
    fn items(&self) -> Result<Vec<TodoItem>>;

    /// The committed items belonging to one list.
    fn items_by_list(&self, list_id: ListId) -> Result<Vec<TodoItem>>;

    /// A single committed item, or `None` if no row matches.
    fn find_item(&self, id: ItemId) -> Result<Option<TodoItem>>;

    /// Stage an insert. Assigns `list.id` and `list.version` immediately.
    fn add_list(&mut self, list: &mut TodoList);

    /// Stage a full-row replace keyed by `list.id`, checked against
    /// `list.version` at commit time.
    fn update_list(&mut self, list: &TodoList);

    /// Stage removal of a list. Its items are cascade-deleted at commit.
    fn remove_list(&mut self, id: ListId);

    /// Stage an insert. Assigns `item.id` and `item.version` immediately.
    fn add_item(&mut self, item: &mut TodoItem);

    /// Stage a full-row replace keyed by `item.id`.
    fn update_item(&mut self, item: &TodoItem);

    /// Stage removal of a single item.
    fn remove_item(&mut self, id: ItemId);

    /// Apply all staged mutations as one unit of work.
    ///
    /// On failure nothing is applied and the staged set is discarded.
    fn commit(&mut self) -> Result<()>;
}
