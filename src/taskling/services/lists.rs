//! List lifecycle: fetch, create, update, cascade delete, deep copy.

use super::{ensure_persisted, ensure_title, ensure_valid_id};
use crate::error::{Result, TodoError};
use crate::model::{ListId, ListWithItems, TodoItem, TodoList};
use crate::store::TodoContext;

/// Suffix appended to the titles of a copied list and its items.
const COPY_SUFFIX: &str = " (Copied)";

/// All lists, items not loaded.
pub fn all<C: TodoContext>(ctx: &C) -> Result<Vec<TodoList>> {
    ctx.lists()
}

/// A single list with its items eager-loaded.
pub fn by_id<C: TodoContext>(ctx: &C, id: ListId) -> Result<ListWithItems> {
    ensure_valid_id(id)?;
    let list = ctx.find_list(id)?.ok_or(TodoError::ListNotFound(id))?;
    let items = ctx.items_by_list(id)?;
    Ok(ListWithItems { list, items })
}

/// Persist a new list. The store assigns the id.
pub fn add<C: TodoContext>(ctx: &mut C, mut list: TodoList) -> Result<TodoList> {
    ensure_title(&list.title)?;
    ctx.add_list(&mut list);
    ctx.commit()?;
    Ok(list)
}

/// Full-row replace of an already-persisted list. Returns the stored row,
/// version bumped. A lost race surfaces as `Conflict` from the commit.
pub fn update<C: TodoContext>(ctx: &mut C, list: TodoList) -> Result<TodoList> {
    ensure_persisted("list", list.id)?;
    ensure_title(&list.title)?;
    ctx.update_list(&list);
    ctx.commit()?;
    ctx.find_list(list.id)?.ok_or(TodoError::ListNotFound(list.id))
}

/// Replace several lists in one unit of work: either every row is updated or
/// none is.
pub fn update_range<C: TodoContext>(ctx: &mut C, lists: Vec<TodoList>) -> Result<Vec<TodoList>> {
    for list in &lists {
        ensure_persisted("list", list.id)?;
        ensure_title(&list.title)?;
    }
    for list in &lists {
        ctx.update_list(list);
    }
    ctx.commit()?;

    let mut updated = Vec::with_capacity(lists.len());
    for list in &lists {
        updated.push(ctx.find_list(list.id)?.ok_or(TodoError::ListNotFound(list.id))?);
    }
    Ok(updated)
}

/// Delete a list and, through the store's cascade rule, every item in it.
/// Returns the removed list.
pub fn delete<C: TodoContext>(ctx: &mut C, id: ListId) -> Result<TodoList> {
    ensure_valid_id(id)?;
    let list = ctx.find_list(id)?.ok_or(TodoError::ListNotFound(id))?;
    ctx.remove_list(id);
    ctx.commit()?;
    Ok(list)
}

/// Structural deep copy: a new list (title suffixed, same description and
/// hidden flag) plus a clone of every item (title suffixed, same fields,
/// completion re-derived, re-parented to the new list, fresh ids). Committed
/// as a single unit of work so a failure leaves no partial clone.
pub fn copy<C: TodoContext>(ctx: &mut C, id: ListId) -> Result<ListWithItems> {
    let source = ctx.find_list(id)?.ok_or_else(|| {
        TodoError::InvalidState(format!("Cannot copy list {}: no such list.", id))
    })?;
    let source_items = ctx.items_by_list(id)?;

    let mut clone = TodoList::new(format!("{}{}", source.title, COPY_SUFFIX));
    clone.description = source.description.clone();
    clone.is_hidden = source.is_hidden;
    ctx.add_list(&mut clone);

    let mut cloned_items = Vec::with_capacity(source_items.len());
    for item in &source_items {
        let mut copied = TodoItem::new(clone.id, format!("{}{}", item.title, COPY_SUFFIX));
        copied.description = item.description.clone();
        copied.status = item.status;
        copied.creation_date = item.creation_date;
        copied.due_date = item.due_date;
        copied.derive_completed();
        ctx.add_item(&mut copied);
        cloned_items.push(copied);
    }

    ctx.commit()?;
    Ok(ListWithItems {
        list: clone,
        items: cloned_items,
    })
}

/// Existence check, tolerant of an empty store. Never fails.
pub fn exists<C: TodoContext>(ctx: &C, id: ListId) -> bool {
    matches!(ctx.find_list(id), Ok(Some(_)))
}
