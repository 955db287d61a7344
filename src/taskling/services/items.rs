//! Item lifecycle: fetch, create, update, delete. The denormalized
//! completion flag is re-derived from status on every write.

use super::{ensure_persisted, ensure_title, ensure_valid_id};
use crate::error::{Result, TodoError};
use crate::model::{ItemId, ItemWithList, ListId, TodoItem};
use crate::store::TodoContext;

/// All items, across every list.
pub fn all<C: TodoContext>(ctx: &C) -> Result<Vec<TodoItem>> {
    ctx.items()
}

/// The items belonging to one list.
pub fn by_list<C: TodoContext>(ctx: &C, list_id: ListId) -> Result<Vec<TodoItem>> {
    ensure_valid_id(list_id)?;
    ctx.items_by_list(list_id)
}

/// A single item with its owning list loaded.
pub fn by_id<C: TodoContext>(ctx: &C, id: ItemId) -> Result<ItemWithList> {
    ensure_valid_id(id)?;
    let item = ctx.find_item(id)?.ok_or(TodoError::ItemNotFound(id))?;
    let list = ctx
        .find_list(item.list_id)?
        .ok_or(TodoError::ListNotFound(item.list_id))?;
    Ok(ItemWithList { item, list })
}

/// Persist a new item. The completion flag is derived from status; any
/// caller-supplied value is discarded. A dangling `list_id` is rejected by
/// the store's foreign-key check at commit.
pub fn add<C: TodoContext>(ctx: &mut C, mut item: TodoItem) -> Result<TodoItem> {
    ensure_title(&item.title)?;
    item.derive_completed();
    ctx.add_item(&mut item);
    ctx.commit()?;
    Ok(item)
}

/// Full-row replace of an already-persisted item, completion re-derived.
/// Returns the stored row, version bumped.
pub fn update<C: TodoContext>(ctx: &mut C, mut item: TodoItem) -> Result<TodoItem> {
    ensure_persisted("item", item.id)?;
    ensure_title(&item.title)?;
    item.derive_completed();
    ctx.update_item(&item);
    ctx.commit()?;
    ctx.find_item(item.id)?.ok_or(TodoError::ItemNotFound(item.id))
}

/// Delete a single item. Returns the removed item.
pub fn delete<C: TodoContext>(ctx: &mut C, id: ItemId) -> Result<TodoItem> {
    ensure_valid_id(id)?;
    let item = ctx.find_item(id)?.ok_or(TodoError::ItemNotFound(id))?;
    ctx.remove_item(id);
    ctx.commit()?;
    Ok(item)
}

/// Existence check, tolerant of an empty store. Never fails.
pub fn exists<C: TodoContext>(ctx: &C, id: ItemId) -> bool {
    matches!(ctx.find_item(id), Ok(Some(_)))
}
