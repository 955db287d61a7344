//! # API Facade
//!
//! The API layer is a **thin facade** over the service layer. It is the
//! single entry point for all taskling operations, regardless of the UI
//! being used.
//!
//! The facade dispatches to the service functions and composes them where
//! the original UI flows did (hiding a list, revealing all hidden lists). It
//! holds no business logic of its own, performs no I/O beyond the context it
//! owns, and returns structured types only.
//!
//! ## Generic Over TodoContext
//!
//! `TodoApi<C: TodoContext>` is generic over the persistence context:
//! - Production: `TodoApi<FileContext>`
//! - Testing: `TodoApi<MemoryContext>`

use crate::error::Result;
use crate::model::{ItemId, ItemWithList, ListId, ListWithItems, TodoItem, TodoList};
use crate::services::{items, lists};
use crate::store::TodoContext;

/// The main API facade for taskling operations.
///
/// Owns the persistence context; one facade per logical session.
pub struct TodoApi<C: TodoContext> {
    ctx: C,
}

impl<C: TodoContext> TodoApi<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }

    // --- Lists ---

    pub fn lists(&self) -> Result<Vec<TodoList>> {
        lists::all(&self.ctx)
    }

    pub fn list(&self, id: ListId) -> Result<ListWithItems> {
        lists::by_id(&self.ctx, id)
    }

    pub fn add_list(&mut self, list: TodoList) -> Result<TodoList> {
        lists::add(&mut self.ctx, list)
    }

    pub fn update_list(&mut self, list: TodoList) -> Result<TodoList> {
        lists::update(&mut self.ctx, list)
    }

    pub fn update_lists(&mut self, batch: Vec<TodoList>) -> Result<Vec<TodoList>> {
        lists::update_range(&mut self.ctx, batch)
    }

    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList> {
        lists::delete(&mut self.ctx, id)
    }

    pub fn copy_list(&mut self, id: ListId) -> Result<ListWithItems> {
        lists::copy(&mut self.ctx, id)
    }

    pub fn list_exists(&self, id: ListId) -> bool {
        lists::exists(&self.ctx, id)
    }

    /// Archive a list: fetch, flip the hidden flag, update.
    pub fn hide_list(&mut self, id: ListId) -> Result<TodoList> {
        let mut list = lists::by_id(&self.ctx, id)?.list;
        list.is_hidden = true;
        lists::update(&mut self.ctx, list)
    }

    /// Un-hide every hidden list in one unit of work.
    pub fn reveal_lists(&mut self) -> Result<Vec<TodoList>> {
        let hidden: Vec<TodoList> = lists::all(&self.ctx)?
            .into_iter()
            .filter(|list| list.is_hidden)
            .map(|mut list| {
                list.is_hidden = false;
                list
            })
            .collect();
        lists::update_range(&mut self.ctx, hidden)
    }

    // --- Items ---

    pub fn items(&self) -> Result<Vec<TodoItem>> {
        items::all(&self.ctx)
    }

    pub fn items_in(&self, list_id: ListId) -> Result<Vec<TodoItem>> {
        items::by_list(&self.ctx, list_id)
    }

    pub fn item(&self, id: ItemId) -> Result<ItemWithList> {
        items::by_id(&self.ctx, id)
    }

    pub fn add_item(&mut self, item: TodoItem) -> Result<TodoItem> {
        items::add(&mut self.ctx, item)
    }

    pub fn update_item(&mut self, item: TodoItem) -> Result<TodoItem> {
        items::update(&mut self.ctx, item)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<TodoItem> {
        items::delete(&mut self.ctx, id)
    }

    pub fn item_exists(&self, id: ItemId) -> bool {
        items::exists(&self.ctx, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryContext;

    fn api() -> TodoApi<MemoryContext> {
        TodoApi::new(MemoryContext::new())
    }

    #[test]
    fn add_and_fetch_through_facade() {
        let mut api = api();
        let list = api.add_list(TodoList::new("Groceries")).unwrap();
        api.add_item(TodoItem::new(list.id, "Milk")).unwrap();

        let detail = api.list(list.id).unwrap();
        assert_eq!(detail.list.title, "Groceries");
        assert_eq!(detail.items.len(), 1);
    }

    #[test]
    fn hide_list_sets_flag() {
        let mut api = api();
        let list = api.add_list(TodoList::new("Archive me")).unwrap();
        let hidden = api.hide_list(list.id).unwrap();
        assert!(hidden.is_hidden);
        assert!(api.list(list.id).unwrap().list.is_hidden);
    }

    #[test]
    fn reveal_lists_unhides_every_hidden_list() {
        let mut api = api();
        let a = api.add_list(TodoList::new("A")).unwrap();
        api.add_list(TodoList::new("B")).unwrap();
        let c = api.add_list(TodoList::new("C")).unwrap();
        api.hide_list(a.id).unwrap();
        api.hide_list(c.id).unwrap();

        let revealed = api.reveal_lists().unwrap();

        assert_eq!(revealed.len(), 2);
        assert!(api.lists().unwrap().iter().all(|list| !list.is_hidden));
    }

    #[test]
    fn reveal_with_nothing_hidden_is_a_noop() {
        let mut api = api();
        api.add_list(TodoList::new("Visible")).unwrap();
        let revealed = api.reveal_lists().unwrap();
        assert!(revealed.is_empty());
    }

    #[test]
    fn copy_through_facade() {
        let mut api = api();
        let list = api.add_list(TodoList::new("Groceries")).unwrap();
        api.add_item(TodoItem::new(list.id, "Milk")).unwrap();

        let copied = api.copy_list(list.id).unwrap();
        assert_eq!(copied.list.title, "Groceries (Copied)");
        assert_eq!(copied.items.len(), 1);
        assert!(api.list_exists(copied.list.id));
    }

    #[test]
    fn exists_checks_never_fail_on_empty_store() {
        let api = api();
        assert!(!api.list_exists(1));
        assert!(!api.item_exists(1));
    }
}
