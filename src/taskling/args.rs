use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskling::model::ItemStatus;

#[derive(Parser, Debug)]
#[command(name = "taskling", version)]
#[command(about = "Track todo lists and their items from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use a specific data file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List todo lists
    #[command(alias = "ls")]
    Lists {
        /// Include hidden lists
        #[arg(short, long)]
        all: bool,
    },

    /// Show a list and its items
    Show {
        /// Id of the list
        id: i64,
    },

    /// Create a new list
    Add {
        /// Title of the list
        title: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a list's title or description
    Edit {
        /// Id of the list
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a list and every item in it
    #[command(alias = "rm")]
    Delete {
        /// Id of the list
        id: i64,
    },

    /// Duplicate a list together with its items
    Copy {
        /// Id of the list to copy
        id: i64,
    },

    /// Hide a list from the default view
    Hide {
        /// Id of the list
        id: i64,
    },

    /// Reveal all hidden lists
    Reveal,

    /// Work with the items inside lists
    #[command(subcommand)]
    Item(ItemCommands),
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items, optionally restricted to one list
    #[command(alias = "ls")]
    List {
        /// Only items from this list
        #[arg(short, long)]
        list: Option<i64>,
    },

    /// Show a single item
    Show {
        /// Id of the item
        id: i64,
    },

    /// Add an item to a list
    Add {
        /// Id of the list the item belongs to
        list: i64,

        /// Title of the item
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Edit an item
    Edit {
        /// Id of the item
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Id of the item
        id: i64,
    },
}

/// Item status as spelled on the command line.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum StatusArg {
    NotStarted,
    InProgress,
    Completed,
}

impl From<StatusArg> for ItemStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::NotStarted => ItemStatus::NotStarted,
            StatusArg::InProgress => ItemStatus::InProgress,
            StatusArg::Completed => ItemStatus::Completed,
        }
    }
}
