use super::tables::{Pending, Tables};
use super::TodoContext;
use crate::error::Result;
use crate::model::{ItemId, ListId, TodoItem, TodoList};

/// In-memory persistence context for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct MemoryContext {
    tables: Tables,
    pending: Vec<Pending>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoContext for MemoryContext {
    fn lists(&self) -> Result<Vec<TodoList>> {
        Ok(self.tables.lists.values().cloned().collect())
    }

    fn find_list(&self, id: ListId) -> Result<Option<TodoList>> {
        Ok(self.tables.lists.get(&id).cloned())
    }

    fn items(&self) -> Result<Vec<TodoItem>> {
        Ok(self.tables.items.values().cloned().collect())
    }

    fn items_by_list(&self, list_id: ListId) -> Result<Vec<TodoItem>> {
        Ok(self
            .tables
            .items
            .values()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect())
    }

    fn find_item(&self, id: ItemId) -> Result<Option<TodoItem>> {
        Ok(self.tables.items.get(&id).cloned())
    }

    fn add_list(&mut self, list: &mut TodoList) {
        list.id = self.tables.allocate_list_id();
        list.version = 1;
        self.pending.push(Pending::InsertList(list.clone()));
    }

    fn update_list(&mut self, list: &TodoList) {
        self.pending.push(Pending::UpdateList(list.clone()));
    }

    fn remove_list(&mut self, id: ListId) {
        self.pending.push(Pending::RemoveList(id));
    }

    fn add_item(&mut self, item: &mut TodoItem) {
        item.id = self.tables.allocate_item_id();
        item.version = 1;
        self.pending.push(Pending::InsertItem(item.clone()));
    }

    fn update_item(&mut self, item: &TodoItem) {
        self.pending.push(Pending::UpdateItem(item.clone()));
    }

    fn remove_item(&mut self, id: ItemId) {
        self.pending.push(Pending::RemoveItem(id));
    }

    fn commit(&mut self) -> Result<()> {
        let ops = std::mem::take(&mut self.pending);
        let mut scratch = self.tables.clone();
        scratch.apply(&ops)?;
        self.tables = scratch;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ItemStatus;

    pub struct ContextFixture {
        pub ctx: MemoryContext,
    }

    impl Default for ContextFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ContextFixture {
        pub fn new() -> Self {
            Self {
                ctx: MemoryContext::new(),
            }
        }

        pub fn with_list(mut self, title: &str) -> Self {
            let mut list = TodoList::new(title);
            self.ctx.add_list(&mut list);
            self.ctx.commit().unwrap();
            self
        }

        pub fn with_hidden_list(mut self, title: &str) -> Self {
            let mut list = TodoList::new(title);
            list.is_hidden = true;
            self.ctx.add_list(&mut list);
            self.ctx.commit().unwrap();
            self
        }

        pub fn with_item(mut self, list_id: ListId, title: &str) -> Self {
            let mut item = TodoItem::new(list_id, title);
            self.ctx.add_item(&mut item);
            self.ctx.commit().unwrap();
            self
        }

        pub fn with_completed_item(mut self, list_id: ListId, title: &str) -> Self {
            let mut item = TodoItem::new(list_id, title).with_status(ItemStatus::Completed);
            self.ctx.add_item(&mut item);
            self.ctx.commit().unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_mutations_are_invisible_until_commit() {
        let mut ctx = MemoryContext::new();
        let mut list = TodoList::new("Groceries");
        ctx.add_list(&mut list);

        assert!(ctx.lists().unwrap().is_empty());
        ctx.commit().unwrap();
        assert_eq!(ctx.lists().unwrap().len(), 1);
    }

    #[test]
    fn add_assigns_sequential_ids_at_staging_time() {
        let mut ctx = MemoryContext::new();
        let mut first = TodoList::new("A");
        let mut second = TodoList::new("B");
        ctx.add_list(&mut first);
        ctx.add_list(&mut second);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.version, 1);
    }

    #[test]
    fn failed_commit_leaves_state_untouched_and_discards_staging() {
        let mut ctx = MemoryContext::new();
        let mut list = TodoList::new("A");
        ctx.add_list(&mut list);
        ctx.commit().unwrap();

        // A valid insert staged together with a dangling item: the whole
        // batch must be rejected.
        let mut other = TodoList::new("B");
        ctx.add_list(&mut other);
        let mut orphan = TodoItem::new(999, "dangling");
        ctx.add_item(&mut orphan);
        assert!(ctx.commit().is_err());

        assert_eq!(ctx.lists().unwrap().len(), 1);
        assert!(ctx.items().unwrap().is_empty());

        // The staged set is gone; an immediate retry commits nothing.
        ctx.commit().unwrap();
        assert_eq!(ctx.lists().unwrap().len(), 1);
    }

    #[test]
    fn items_by_list_filters() {
        let fixture = fixtures::ContextFixture::new()
            .with_list("A")
            .with_list("B")
            .with_item(1, "a1")
            .with_item(1, "a2")
            .with_item(2, "b1");

        let items = fixture.ctx.items_by_list(1).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.list_id == 1));
    }
}
