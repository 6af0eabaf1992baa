use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rWorklog
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work records and keep their time sessions consistent: find problems, conflicts and duplicates, merge them",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        /// Print the current configuration
        #[arg(long = "print")]
        print_config: bool,
    },

    /// Start a timer on a work record (created if needed)
    Start {
        /// Work name
        work: String,
        /// Deal name
        #[arg(default_value = "")]
        deal: String,
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "project")]
        project_code: Option<String>,
    },

    /// Stop the running timer
    Stop,

    /// Add a closed session by hand
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Start time (HH:MM)
        #[arg(long = "in")]
        start: String,
        /// End time (HH:MM)
        #[arg(long = "out")]
        end: String,
        /// Existing record id to add the session to
        #[arg(long, conflicts_with = "work")]
        record: Option<String>,
        /// Work name (record found or created by work/deal on the date)
        #[arg(long, required_unless_present = "record")]
        work: Option<String>,
        #[arg(long, default_value = "")]
        deal: String,
        #[arg(long)]
        category: Option<String>,
    },

    /// List records
    List {
        /// Filter by period: YYYY, YYYY-MM, YYYY-MM-DD or ranges like YYYY-MM:YYYY-MM
        #[arg(long, short)]
        period: Option<String>,

        /// Include soft-deleted records
        #[arg(long)]
        deleted: bool,

        /// Show each record's sessions
        #[arg(long)]
        sessions: bool,
    },

    /// Report session problems, time conflicts and duplicate records
    Check {
        #[arg(long)]
        problems: bool,
        #[arg(long)]
        conflicts: bool,
        #[arg(long)]
        duplicates: bool,
    },

    /// Merge duplicate or conflicting records into one
    Merge {
        /// Record ids to merge (comma separated)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["key", "all"])]
        ids: Vec<String>,

        /// Merge the duplicate group with this identity key
        #[arg(long, conflicts_with = "all")]
        key: Option<String>,

        /// Merge every duplicate group
        #[arg(long)]
        all: bool,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Soft-delete, restore or purge a record
    Del {
        /// Record id
        id: String,

        /// Remove the record permanently
        #[arg(long, conflicts_with = "restore")]
        purge: bool,

        /// Undo a soft delete
        #[arg(long)]
        restore: bool,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Time statistics
    Stats {
        /// Period to analyse (default: current month)
        #[arg(long, short)]
        period: Option<String>,
    },

    /// Export records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Include soft-deleted records
        #[arg(long)]
        deleted: bool,

        /// Overwrite output file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import records from a JSON export
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print")]
        print: bool,
    },
}
