//! Committed relational state shared by every backend: two id-keyed tables,
//! the id counters, and the commit-time application of staged mutations.
//! Backends clone the tables, apply the staged set against the clone, and
//! swap it in only when every mutation succeeded.

use crate::error::{Result, TodoError};
use crate::model::{ItemId, ListId, TodoItem, TodoList};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A staged mutation, recorded by the context and applied at commit.
#[derive(Debug, Clone)]
pub(crate) enum Pending {
    InsertList(TodoList),
    UpdateList(TodoList),
    RemoveList(ListId),
    InsertItem(TodoItem),
    UpdateItem(TodoItem),
    RemoveItem(ItemId),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Tables {
    #[serde(default)]
    pub(crate) lists: BTreeMap<ListId, TodoList>,
    #[serde(default)]
    pub(crate) items: BTreeMap<ItemId, TodoItem>,
    // Monotonic counters; ids are never reused, even after deletes.
    #[serde(default)]
    pub(crate) last_list_id: ListId,
    #[serde(default)]
    pub(crate) last_item_id: ItemId,
}

impl Tables {
    pub(crate) fn allocate_list_id(&mut self) -> ListId {
        self.last_list_id += 1;
        self.last_list_id
    }

    pub(crate) fn allocate_item_id(&mut self) -> ItemId {
        self.last_item_id += 1;
        self.last_item_id
    }

    /// Apply staged mutations in order. The first failure aborts the whole
    /// batch; callers must work on a scratch copy so an abort cannot leave
    /// partially-applied state behind.
    pub(crate) fn apply(&mut self, ops: &[Pending]) -> Result<()> {
        for op in ops {
            match op {
                Pending::InsertList(list) => {
                    self.lists.insert(list.id, list.clone());
                }
                Pending::UpdateList(list) => {
                    let current = self.lists.get(&list.id).ok_or(TodoError::Conflict {
                        entity: "list",
                        id: list.id,
                    })?;
                    if current.version != list.version {
                        return Err(TodoError::Conflict {
                            entity: "list",
                            id: list.id,
                        });
                    }
                    let mut row = list.clone();
                    row.version += 1;
                    self.lists.insert(row.id, row);
                }
                Pending::RemoveList(id) => {
                    if self.lists.remove(id).is_none() {
                        return Err(TodoError::Conflict {
                            entity: "list",
                            id: *id,
                        });
                    }
                    // Cascade: a removed list takes its items with it.
                    self.items.retain(|_, item| item.list_id != *id);
                }
                Pending::InsertItem(item) => {
                    if !self.lists.contains_key(&item.list_id) {
                        return Err(TodoError::UnknownList {
                            item_id: item.id,
                            list_id: item.list_id,
                        });
                    }
                    self.items.insert(item.id, item.clone());
                }
                Pending::UpdateItem(item) => {
                    let current = self.items.get(&item.id).ok_or(TodoError::Conflict {
                        entity: "item",
                        id: item.id,
                    })?;
                    if current.version != item.version {
                        return Err(TodoError::Conflict {
                            entity: "item",
                            id: item.id,
                        });
                    }
                    if !self.lists.contains_key(&item.list_id) {
                        return Err(TodoError::UnknownList {
                            item_id: item.id,
                            list_id: item.list_id,
                        });
                    }
                    let mut row = item.clone();
                    row.version += 1;
                    self.items.insert(row.id, row);
                }
                Pending::RemoveItem(id) => {
                    if self.items.remove(id).is_none() {
                        return Err(TodoError::Conflict {
                            entity: "item",
                            id: *id,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_row(id: ListId, title: &str, version: u64) -> TodoList {
        let mut list = TodoList::new(title);
        list.id = id;
        list.version = version;
        list
    }

    fn item_row(id: ItemId, list_id: ListId, title: &str, version: u64) -> TodoItem {
        let mut item = TodoItem::new(list_id, title);
        item.id = id;
        item.version = version;
        item
    }

    #[test]
    fn insert_then_update_bumps_version() {
        let mut tables = Tables::default();
        tables
            .apply(&[Pending::InsertList(list_row(1, "A", 1))])
            .unwrap();

        let mut updated = list_row(1, "A2", 1);
        updated.version = 1;
        tables.apply(&[Pending::UpdateList(updated)]).unwrap();

        let row = tables.lists.get(&1).unwrap();
        assert_eq!(row.title, "A2");
        assert_eq!(row.version, 2);
    }

    #[test]
    fn stale_version_update_conflicts() {
        let mut tables = Tables::default();
        tables
            .apply(&[Pending::InsertList(list_row(1, "A", 2))])
            .unwrap();

        let stale = list_row(1, "A-old", 1);
        let err = tables.apply(&[Pending::UpdateList(stale)]).unwrap_err();
        assert!(matches!(
            err,
            TodoError::Conflict {
                entity: "list",
                id: 1
            }
        ));
    }

    #[test]
    fn update_of_removed_row_conflicts() {
        let mut tables = Tables::default();
        let err = tables
            .apply(&[Pending::UpdateItem(item_row(9, 1, "gone", 1))])
            .unwrap_err();
        assert!(matches!(err, TodoError::Conflict { entity: "item", .. }));
    }

    #[test]
    fn remove_list_cascades_to_items() {
        let mut tables = Tables::default();
        tables
            .apply(&[
                Pending::InsertList(list_row(1, "A", 1)),
                Pending::InsertList(list_row(2, "B", 1)),
                Pending::InsertItem(item_row(1, 1, "a1", 1)),
                Pending::InsertItem(item_row(2, 1, "a2", 1)),
                Pending::InsertItem(item_row(3, 2, "b1", 1)),
            ])
            .unwrap();

        tables.apply(&[Pending::RemoveList(1)]).unwrap();

        assert!(tables.lists.get(&1).is_none());
        assert!(tables.items.values().all(|item| item.list_id != 1));
        assert_eq!(tables.items.len(), 1);
    }

    #[test]
    fn insert_item_requires_existing_list() {
        let mut tables = Tables::default();
        let err = tables
            .apply(&[Pending::InsertItem(item_row(1, 42, "orphan", 1))])
            .unwrap_err();
        assert!(matches!(
            err,
            TodoError::UnknownList {
                item_id: 1,
                list_id: 42
            }
        ));
    }

    #[test]
    fn item_can_reference_list_inserted_in_same_batch() {
        // The copy operation stages a new list and its items together.
        let mut tables = Tables::default();
        tables
            .apply(&[
                Pending::InsertList(list_row(1, "A", 1)),
                Pending::InsertItem(item_row(1, 1, "a1", 1)),
            ])
            .unwrap();
        assert_eq!(tables.items.len(), 1);
    }

    #[test]
    fn allocated_ids_are_never_reused() {
        let mut tables = Tables::default();
        let first = tables.allocate_list_id();
        tables
            .apply(&[Pending::InsertList(list_row(first, "A", 1))])
            .unwrap();
        tables.apply(&[Pending::RemoveList(first)]).unwrap();

        let second = tables.allocate_list_id();
        assert!(second > first);
    }
}
