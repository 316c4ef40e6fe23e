use crate::core::import::ImportEntity;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rPlanner
/// CLI team planner: projects, tasks and leaves on a per-day calendar, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rplanner",
    version = env!("CARGO_PKG_VERSION"),
    about = "A team planner CLI: projects, tasks, leaves, a day-by-day calendar and a kanban board on SQLite",
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

/// Filters shared by `calendar` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        long = "type",
        value_name = "KINDS",
        help = "Comma separated event kinds: task, project, simple_task, leave"
    )]
    pub kinds: Option<String>,

    #[arg(long, value_name = "ID", help = "Only events of this project")]
    pub project: Option<i32>,

    #[arg(long, help = "Only events of this service")]
    pub service: Option<String>,

    #[arg(long, help = "Category: task or simple_task")]
    pub category: Option<String>,

    #[arg(long = "all", help = "Include tasks already done")]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCmd),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCmd),

    /// Manage leaves (absences)
    #[command(subcommand)]
    Leave(LeaveCmd),

    /// Show the day-by-day calendar
    Calendar {
        #[arg(
            long,
            short,
            help = "Year, month, day or a range (YYYY, YYYY-MM, YYYY-MM-DD, A:B); default current month"
        )]
        period: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the kanban board
    Board {
        #[arg(long, value_name = "ID", help = "Only tasks of this project")]
        project: Option<i32>,
    },

    /// Import projects, tasks or leaves from a CSV file
    Import {
        #[arg(long, value_enum)]
        entity: ImportEntity,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "MAP",
            help = "Column mapping, e.g. title=Summary,due_date=Deadline"
        )]
        map: Option<String>,

        #[arg(long = "dry-run", help = "Validate only, write nothing")]
        dry_run: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export calendar events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Export window: year/month/day or a custom range; default current month"
        )]
        range: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCmd {
    /// Add a project
    Add {
        name: String,

        #[arg(long)]
        service: Option<String>,

        #[arg(long, help = "planned, active, on_hold, completed")]
        status: Option<String>,

        #[arg(long = "start", help = "Start date (YYYY-MM-DD)")]
        start_date: Option<String>,

        #[arg(long = "end", help = "End date (YYYY-MM-DD)")]
        end_date: Option<String>,
    },

    /// List projects
    List,

    /// Delete a project (its tasks are kept)
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCmd {
    /// Add a task
    Add {
        title: String,

        #[arg(long, value_name = "ID")]
        project: Option<i32>,

        #[arg(long)]
        service: Option<String>,

        #[arg(long, help = "task or simple_task")]
        category: Option<String>,

        #[arg(long, help = "todo, in_progress, review, done")]
        status: Option<String>,

        #[arg(long, help = "low, medium, high, urgent")]
        priority: Option<String>,

        #[arg(long = "start", help = "Start date (YYYY-MM-DD)")]
        start_date: Option<String>,

        #[arg(long = "due", help = "Due date (YYYY-MM-DD)")]
        due_date: Option<String>,

        #[arg(long = "from", help = "Start time (HH:MM)")]
        start_time: Option<String>,

        #[arg(long = "to", help = "End time (HH:MM)")]
        end_time: Option<String>,
    },

    /// List tasks
    List {
        #[arg(long, value_name = "ID")]
        project: Option<i32>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a task
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Set the status of a task (the card goes to the end of the column)
    Status { id: i32, status: String },

    /// Move a task on the board
    Move {
        id: i32,

        #[arg(long = "to", help = "Target status")]
        to: String,

        #[arg(long, help = "0-based position inside the target column")]
        index: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum LeaveCmd {
    /// Add a leave
    Add {
        #[arg(help = "First day (YYYY-MM-DD)")]
        start: String,

        #[arg(help = "Last day (YYYY-MM-DD); defaults to the first day")]
        end: Option<String>,

        #[arg(long, help = "User on leave; defaults to default_user")]
        user: Option<String>,

        #[arg(long, help = "vacation, sick, personal, other")]
        kind: Option<String>,

        #[arg(long, help = "pending, approved, rejected")]
        status: Option<String>,

        #[arg(long = "half-start", help = "The leave starts at midday")]
        half_day_start: bool,

        #[arg(long = "half-end", help = "The leave ends at midday")]
        half_day_end: bool,

        #[arg(long)]
        note: Option<String>,
    },

    /// List leaves
    List {
        #[arg(long)]
        user: Option<String>,
    },

    /// Delete a leave
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Approve or reject a leave
    Status { id: i32, status: String },
}
