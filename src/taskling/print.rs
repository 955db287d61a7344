use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use taskling::model::{ItemStatus, ItemWithList, ListWithItems, TodoItem, TodoList};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 44;

pub(crate) fn success(content: impl AsRef<str>) {
    println!("{}", content.as_ref().green());
}

pub(crate) fn info(content: impl AsRef<str>) {
    println!("{}", content.as_ref().dimmed());
}

pub(crate) fn print_lists(rows: &[(TodoList, usize)]) {
    if rows.is_empty() {
        println!("No lists found.");
        return;
    }

    for (list, item_count) in rows {
        let title = pad_to_width(&list.title, TITLE_WIDTH);
        let count = match item_count {
            0 => "empty".to_string(),
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        };
        let marker = if list.is_hidden { " (hidden)" } else { "" };
        println!(
            "{:>4}. {} {}{}",
            list.id,
            title.bold(),
            count.dimmed(),
            marker.dimmed()
        );
    }
}

pub(crate) fn print_list_detail(detail: &ListWithItems) {
    println!(
        "{} {}{}",
        format!("{}.", detail.list.id).yellow(),
        detail.list.title.bold(),
        if detail.list.is_hidden {
            " (hidden)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    if let Some(description) = &detail.list.description {
        println!("{}", description);
    }
    println!("--------------------------------");
    if detail.items.is_empty() {
        println!("No items yet.");
        return;
    }
    print_items(&detail.items);
}

pub(crate) fn print_items(items: &[TodoItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    for item in items {
        let title = pad_to_width(&item.title, TITLE_WIDTH);
        let due = match &item.due_date {
            Some(due) => format!("due {}  ", due.format("%Y-%m-%d")),
            None => String::new(),
        };
        let age = match item.creation_date {
            Some(created) => format_time_ago(created),
            None => String::new(),
        };
        println!(
            "{} {:>4}. {} {}{}",
            status_glyph(item),
            item.id,
            title,
            due.dimmed(),
            age.dimmed()
        );
    }
}

pub(crate) fn print_item_detail(found: &ItemWithList) {
    let item = &found.item;
    println!(
        "{} {} {}",
        status_glyph(item),
        format!("{}.", item.id).yellow(),
        item.title.bold()
    );
    println!("--------------------------------");
    println!("List: {} ({})", found.list.title, found.list.id);
    if let Some(description) = &item.description {
        println!("{}", description);
    }
    if let Some(status) = item.status {
        println!("Status: {:?}", status);
    }
    if let Some(due) = item.due_date {
        println!("Due: {}", due.format("%Y-%m-%d"));
    }
    if let Some(created) = item.creation_date {
        println!("Created: {}", format_time_ago(created));
    }
}

fn status_glyph(item: &TodoItem) -> ColoredString {
    match item.status {
        Some(ItemStatus::Completed) => "[x]".green(),
        Some(ItemStatus::InProgress) => "[~]".yellow(),
        Some(ItemStatus::NotStarted) | None => "[ ]".normal(),
    }
}

fn format_time_ago(time: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(time);
    match duration.to_std() {
        Ok(duration) => Formatter::new().convert(duration),
        Err(_) => "just now".to_string(),
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}
