use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::path::PathBuf;
use taskling::api::TodoApi;
use taskling::config::TodoConfig;
use taskling::error::{Result, TodoError};
use taskling::model::{TodoItem, TodoList};
use taskling::store::fs::FileContext;

mod args;
mod print;

use args::{Cli, Commands, ItemCommands, StatusArg};

const DATA_FILENAME: &str = "todos.json";
const DATA_FILE_ENV: &str = "TASKLING_DATA_FILE";

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let (data_file, config) = resolve_data_file(&cli)?;
    let mut api = TodoApi::new(FileContext::open(data_file)?);

    match cli.command {
        Commands::Lists { all } => handle_lists(&api, all || config.show_hidden),
        Commands::Show { id } => handle_show(&api, id),
        Commands::Add { title, description } => handle_add(&mut api, title, description),
        Commands::Edit {
            id,
            title,
            description,
        } => handle_edit(&mut api, id, title, description),
        Commands::Delete { id } => handle_delete(&mut api, id),
        Commands::Copy { id } => handle_copy(&mut api, id),
        Commands::Hide { id } => handle_hide(&mut api, id),
        Commands::Reveal => handle_reveal(&mut api),
        Commands::Item(command) => match command {
            ItemCommands::List { list } => handle_items(&api, list),
            ItemCommands::Show { id } => handle_item_show(&api, id),
            ItemCommands::Add {
                list,
                title,
                description,
                due,
                status,
            } => handle_item_add(&mut api, list, title, description, due, status),
            ItemCommands::Edit {
                id,
                title,
                description,
                due,
                status,
            } => handle_item_edit(&mut api, id, title, description, due, status),
            ItemCommands::Delete { id } => handle_item_delete(&mut api, id),
        },
    }
}

/// Resolve the data file. A `--data-file` flag or the environment override
/// wins outright (and skips the config lookup); otherwise the configured
/// location, falling back to the platform data directory.
fn resolve_data_file(cli: &Cli) -> Result<(PathBuf, TodoConfig)> {
    if let Some(path) = &cli.data_file {
        return Ok((path.clone(), TodoConfig::default()));
    }
    if let Ok(path) = std::env::var(DATA_FILE_ENV) {
        return Ok((PathBuf::from(path), TodoConfig::default()));
    }

    let proj_dirs = ProjectDirs::from("com", "taskling", "taskling")
        .ok_or_else(|| TodoError::Store("Could not determine data directory".to_string()))?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    let config = TodoConfig::load(&data_dir).unwrap_or_default();
    let data_file = config
        .data_file
        .clone()
        .unwrap_or_else(|| data_dir.join(DATA_FILENAME));
    Ok((data_file, config))
}

// --- List handlers ---

fn handle_lists(api: &TodoApi<FileContext>, show_hidden: bool) -> Result<()> {
    let mut rows = Vec::new();
    for list in api.lists()? {
        if list.is_hidden && !show_hidden {
            continue;
        }
        let item_count = api.items_in(list.id)?.len();
        rows.push((list, item_count));
    }
    print::print_lists(&rows);
    Ok(())
}

fn handle_show(api: &TodoApi<FileContext>, id: i64) -> Result<()> {
    let detail = api.list(id)?;
    print::print_list_detail(&detail);
    Ok(())
}

fn handle_add(
    api: &mut TodoApi<FileContext>,
    title: String,
    description: Option<String>,
) -> Result<()> {
    let mut list = TodoList::new(title);
    list.description = description;
    let added = api.add_list(list)?;
    print::success(format!("List created ({}): {}", added.id, added.title));
    Ok(())
}

fn handle_edit(
    api: &mut TodoApi<FileContext>,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut list = api.list(id)?.list;
    if let Some(title) = title {
        list.title = title;
    }
    if let Some(description) = description {
        list.description = Some(description);
    }
    let updated = update_list_rechecked(api, list)?;
    print::success(format!("List updated ({}): {}", updated.id, updated.title));
    Ok(())
}

fn handle_delete(api: &mut TodoApi<FileContext>, id: i64) -> Result<()> {
    let removed = api.delete_list(id)?;
    print::success(format!(
        "List deleted ({}): {} (items removed with it)",
        removed.id, removed.title
    ));
    Ok(())
}

fn handle_copy(api: &mut TodoApi<FileContext>, id: i64) -> Result<()> {
    let copied = api.copy_list(id)?;
    print::success(format!(
        "List copied ({} -> {}): {}",
        id, copied.list.id, copied.list.title
    ));
    Ok(())
}

fn handle_hide(api: &mut TodoApi<FileContext>, id: i64) -> Result<()> {
    let hidden = hide_list_rechecked(api, id)?;
    print::success(format!("List hidden ({}): {}", hidden.id, hidden.title));
    print::info("Run `taskling reveal` to bring hidden lists back.");
    Ok(())
}

fn handle_reveal(api: &mut TodoApi<FileContext>) -> Result<()> {
    let revealed = api.reveal_lists()?;
    if revealed.is_empty() {
        print::info("No hidden lists.");
    } else {
        print::success(format!("{} list(s) revealed.", revealed.len()));
    }
    Ok(())
}

// --- Item handlers ---

fn handle_items(api: &TodoApi<FileContext>, list: Option<i64>) -> Result<()> {
    let items = match list {
        Some(list_id) => api.items_in(list_id)?,
        None => api.items()?,
    };
    print::print_items(&items);
    Ok(())
}

fn handle_item_show(api: &TodoApi<FileContext>, id: i64) -> Result<()> {
    let found = api.item(id)?;
    print::print_item_detail(&found);
    Ok(())
}

fn handle_item_add(
    api: &mut TodoApi<FileContext>,
    list: i64,
    title: String,
    description: Option<String>,
    due: Option<String>,
    status: Option<StatusArg>,
) -> Result<()> {
    let mut item = TodoItem::new(list, title);
    item.description = description;
    if let Some(raw) = due {
        item.due_date = Some(parse_due_date(&raw)?);
    }
    if let Some(status) = status {
        item.status = Some(status.into());
    }
    let added = api.add_item(item)?;
    print::success(format!("Item created ({}): {}", added.id, added.title));
    Ok(())
}

fn handle_item_edit(
    api: &mut TodoApi<FileContext>,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    status: Option<StatusArg>,
) -> Result<()> {
    let mut item = api.item(id)?.item;
    if let Some(title) = title {
        item.title = title;
    }
    if let Some(description) = description {
        item.description = Some(description);
    }
    if let Some(raw) = due {
        item.due_date = Some(parse_due_date(&raw)?);
    }
    if let Some(status) = status {
        item.status = Some(status.into());
    }
    let updated = update_item_rechecked(api, item)?;
    print::success(format!("Item updated ({}): {}", updated.id, updated.title));
    Ok(())
}

fn handle_item_delete(api: &mut TodoApi<FileContext>, id: i64) -> Result<()> {
    let removed = api.delete_item(id)?;
    print::success(format!("Item deleted ({}): {}", removed.id, removed.title));
    Ok(())
}

// --- Shared plumbing ---

/// A lost update race usually means the row went away underneath us.
/// Re-check and report not-found in that case; a surviving row is a genuine
/// conflict the user has to resolve against fresh data.
fn update_list_rechecked(api: &mut TodoApi<FileContext>, list: TodoList) -> Result<TodoList> {
    let id = list.id;
    match api.update_list(list) {
        Err(TodoError::Conflict { .. }) if !api.list_exists(id) => {
            Err(TodoError::ListNotFound(id))
        }
        other => other,
    }
}

fn hide_list_rechecked(api: &mut TodoApi<FileContext>, id: i64) -> Result<TodoList> {
    match api.hide_list(id) {
        Err(TodoError::Conflict { .. }) if !api.list_exists(id) => {
            Err(TodoError::ListNotFound(id))
        }
        other => other,
    }
}

fn update_item_rechecked(api: &mut TodoApi<FileContext>, item: TodoItem) -> Result<TodoItem> {
    let id = item.id;
    match api.update_item(item) {
        Err(TodoError::Conflict { .. }) if !api.item_exists(id) => {
            Err(TodoError::ItemNotFound(id))
        }
        other => other,
    }
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        TodoError::InvalidState(format!(
            "Invalid due date '{}': expected YYYY-MM-DD.",
            raw
        ))
    })?;
    Ok(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    ))
}
