use super::tables::{Pending, Tables};
use super::TodoContext;
use crate::error::Result;
use crate::model::{ItemId, ListId, TodoItem, TodoList};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed persistence context: both tables plus the id counters live in
/// a single JSON data file. The file is read once at open; queries are served
/// from memory and every successful commit rewrites the file atomically
/// (write to a sibling tmp file, then rename).
#[derive(Debug)]
pub struct FileContext {
    path: PathBuf,
    tables: Tables,
    pending: Vec<Pending>,
}

impl FileContext {
    /// Open the data file at `path`, creating an empty context if the file
    /// does not exist yet. The file itself is only created on first commit.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Tables::default()
        };
        Ok(Self {
            path,
            tables,
            pending: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tables: &Tables) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename so a crash mid-write can never corrupt the
        // committed data file.
        let tmp = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(tables)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TodoContext for FileContext {
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
        self.persist(&scratch)?;
        self.tables = scratch;
        Ok(())
    }
}
