use std::fs;
use taskling::error::TodoError;
use taskling::model::{ItemStatus, TodoItem, TodoList};
use taskling::services::{items, lists};
use taskling::store::fs::FileContext;
use tempfile::TempDir;

fn data_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("todos.json")
}

#[test]
fn commits_survive_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut ctx = FileContext::open(data_file(&dir)).unwrap();
        let list = lists::add(&mut ctx, TodoList::new("Groceries")).unwrap();
        items::add(
            &mut ctx,
            TodoItem::new(list.id, "Milk").with_status(ItemStatus::Completed),
        )
        .unwrap();
        items::add(&mut ctx, TodoItem::new(list.id, "Bread")).unwrap();
    }

    let ctx = FileContext::open(data_file(&dir)).unwrap();
    let detail = lists::by_id(&ctx, 1).unwrap();
    assert_eq!(detail.list.title, "Groceries");
    assert_eq!(detail.items.len(), 2);

    let milk = detail.items.iter().find(|i| i.title == "Milk").unwrap();
    assert!(milk.is_completed);
}

#[test]
fn cascade_delete_persists_across_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut ctx = FileContext::open(data_file(&dir)).unwrap();
        let keep = lists::add(&mut ctx, TodoList::new("Keep")).unwrap();
        let doomed = lists::add(&mut ctx, TodoList::new("Drop")).unwrap();
        items::add(&mut ctx, TodoItem::new(keep.id, "stays")).unwrap();
        items::add(&mut ctx, TodoItem::new(doomed.id, "goes")).unwrap();
        items::add(&mut ctx, TodoItem::new(doomed.id, "goes too")).unwrap();
        lists::delete(&mut ctx, doomed.id).unwrap();
    }

    let ctx = FileContext::open(data_file(&dir)).unwrap();
    assert_eq!(lists::all(&ctx).unwrap().len(), 1);
    let remaining = items::all(&ctx).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "stays");
}

#[test]
fn ids_are_not_reused_after_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut ctx = FileContext::open(data_file(&dir)).unwrap();
        let first = lists::add(&mut ctx, TodoList::new("First")).unwrap();
        lists::delete(&mut ctx, first.id).unwrap();
    }

    let mut ctx = FileContext::open(data_file(&dir)).unwrap();
    let second = lists::add(&mut ctx, TodoList::new("Second")).unwrap();
    assert_eq!(second.id, 2);
}

#[test]
fn no_tmp_artifacts_left_behind() {
    let dir = TempDir::new().unwrap();

    let mut ctx = FileContext::open(data_file(&dir)).unwrap();
    lists::add(&mut ctx, TodoList::new("A")).unwrap();
    lists::add(&mut ctx, TodoList::new("B")).unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn missing_file_is_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let ctx = FileContext::open(&path).unwrap();
    assert!(lists::all(&ctx).unwrap().is_empty());
    // The data file only appears once something is committed.
    assert!(!path.exists());
}

#[test]
fn corrupt_file_reports_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    fs::write(&path, "{ not json").unwrap();

    let err = FileContext::open(&path).unwrap_err();
    assert!(matches!(err, TodoError::Serialization(_)));
}

#[test]
fn failed_commit_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let mut ctx = FileContext::open(&path).unwrap();
    lists::add(&mut ctx, TodoList::new("Only list")).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    // Dangling foreign key: rejected at commit, file must not change.
    let err = items::add(&mut ctx, TodoItem::new(99, "orphan")).unwrap_err();
    assert!(matches!(err, TodoError::UnknownList { .. }));

    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}
