use crate::models::form::ScalarField;
use crate::models::schema::TableKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for scireport
/// CLI application to fill in, save and submit monthly scientist reports
#[derive(Parser)]
#[command(
    name = "scireport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fill in a monthly scientist activity report, keep a local draft and submit it",
    long_about = None
)]
pub struct Cli {
    /// Override the storage directory (useful for tests or several reports)
    #[arg(global = true, long = "storage")]
    pub storage: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the storage directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Set one of the report's scalar fields
    Set {
        #[arg(value_enum)]
        field: ScalarField,

        /// New value (empty string clears the field)
        value: String,
    },

    /// Edit the rows of an activity table
    Row {
        #[command(subcommand)]
        action: RowAction,
    },

    /// Attach, remove or list figures
    Figure {
        #[command(subcommand)]
        action: FigureAction,
    },

    /// Print the whole form
    Show,

    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Compute the time elapsed between two dates (YYYY-MM-DD)
    Duration {
        start: String,
        end: String,

        #[arg(long = "full", help = "Years, months and days instead of days")]
        full: bool,
    },

    /// Write the report archive (JSON + PDF in a zip) without submitting
    Export {
        #[arg(long = "out", value_name = "DIR", help = "Output directory")]
        out: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing archive")]
        force: bool,
    },

    /// Validate and submit the report, then write its archive
    Submit {
        #[arg(long = "out", value_name = "DIR", help = "Output directory")]
        out: Option<String>,

        #[arg(long = "endpoint", help = "Override the configured endpoint")]
        endpoint: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing archive")]
        force: bool,
    },

    /// Print the internal activity log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum RowAction {
    /// Add a row, optionally filling its editable columns in order
    Add {
        #[arg(value_enum)]
        table: TableKind,

        /// Column values; an empty string skips the column. A value outside
        /// a closed choice's options is stored as OTHER with that detail.
        values: Vec<String>,
    },

    /// Set a cell (columns are numbered from 1)
    Set {
        #[arg(value_enum)]
        table: TableKind,
        row: usize,
        col: usize,
        value: String,

        #[arg(long = "detail", help = "Free text for an OTHER selection")]
        detail: Option<String>,
    },

    /// Delete a row; later rows are renumbered
    Del {
        #[arg(value_enum)]
        table: TableKind,
        row: usize,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum FigureAction {
    /// Attach an image and place its token in the research highlight
    Add {
        #[arg(long = "file", value_name = "PATH")]
        file: String,

        #[arg(long = "caption")]
        caption: String,

        #[arg(
            long = "at",
            help = "Character offset in the highlight (default: end of text)"
        )]
        at: Option<usize>,
    },

    /// Remove a figure by id, number or token
    Del {
        key: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List attached figures
    List,
}

#[derive(Subcommand)]
pub enum DraftAction {
    /// Show what is stored
    Show,

    /// Delete the draft and start over
    Clear {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
