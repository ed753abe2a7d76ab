use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bordero::cli::{
    audit_logger, handle_accounts_command, handle_audit_command, handle_config_command,
    handle_export_command, handle_inclusion_command, handle_item_command, handle_items_command,
    handle_move_command, handle_show_command, handle_weeks_command, parse_direction,
    InclusionChange, WeekArgs,
};
use bordero::config::{paths::BorderoPaths, settings::Settings};
use bordero::export::ExportFormat;
use bordero::services::{Direction, PeriodService};
use bordero::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "bordero",
    author = "CEAP Financeiro",
    version,
    about = "Weekly payables schedule (borderô semanal)",
    long_about = "bordero assembles the weekly payment schedule: it selects the items \
                  due in a Monday-to-Sunday week, lets you include, exclude and reorder \
                  them, totals them by account, method and cost center, projects the \
                  closing balance of each funding account and exports the result."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with settings and a sample schedule
    Init {
        /// Overwrite an existing schedule with the sample data
        #[arg(long)]
        force: bool,
    },

    /// Show the weekly summary, balance projection and approval minutes
    Show {
        #[command(flatten)]
        week: WeekArgs,
        /// Skip the approval minutes
        #[arg(long)]
        no_minutes: bool,
    },

    /// List the week's items with their inclusion markers
    #[command(alias = "ls")]
    Items {
        #[command(flatten)]
        week: WeekArgs,
    },

    /// Show one item in full
    Item {
        /// Item ID
        id: String,
    },

    /// Compare the included totals of the weeks around today
    Weeks {
        /// Past weeks to show
        #[arg(long, default_value = "2")]
        back: usize,
        /// Upcoming weeks to show
        #[arg(long, default_value = "2")]
        ahead: usize,
    },

    /// Include an item in the bordero
    Include {
        /// Item ID
        id: String,
    },

    /// Exclude an item from the bordero
    Exclude {
        /// Item ID
        id: String,
    },

    /// Flip an item's inclusion
    Toggle {
        /// Item ID
        id: String,
    },

    /// Move an item one position up or down in the list
    #[command(alias = "mv")]
    Move {
        /// Item ID
        id: String,
        /// Direction: up or down
        #[arg(value_parser = parse_direction)]
        direction: Direction,
    },

    /// Export the week's included items
    Export {
        #[command(flatten)]
        week: WeekArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List funding accounts and opening balances
    Accounts,

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BorderoPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage; `init` replaces the schedule, so it never reads it
    let mut storage = Storage::new(paths.clone())?;
    let replaces_schedule = matches!(cli.command, Some(Commands::Init { .. }));
    if storage.is_initialized() && !replaces_schedule {
        storage.load_all()?;
    }

    let audit = audit_logger(&paths, &settings);

    match cli.command {
        Some(Commands::Init { force }) => {
            println!("Initializing bordero at: {}", paths.base_dir().display());
            let now = PeriodService::new(&settings).now();
            if initialize_storage(&paths, &settings, now, force)? {
                println!("Sample schedule written to {}", paths.schedule_file().display());
                println!();
                println!("Three funding accounts and four payment items were created.");
                println!("Run 'bordero show' to see this week's bordero.");
            } else {
                println!("A schedule already exists; use --force to replace it with the sample.");
            }
        }
        Some(Commands::Show { week, no_minutes }) => {
            handle_show_command(&storage, &settings, &week, !no_minutes)?;
        }
        Some(Commands::Items { week }) => {
            handle_items_command(&storage, &settings, &week)?;
        }
        Some(Commands::Item { id }) => {
            handle_item_command(&storage, &settings, &id)?;
        }
        Some(Commands::Weeks { back, ahead }) => {
            handle_weeks_command(&storage, &settings, back, ahead)?;
        }
        Some(Commands::Include { id }) => {
            handle_inclusion_command(&storage, &audit, &id, InclusionChange::Include)?;
        }
        Some(Commands::Exclude { id }) => {
            handle_inclusion_command(&storage, &audit, &id, InclusionChange::Exclude)?;
        }
        Some(Commands::Toggle { id }) => {
            handle_inclusion_command(&storage, &audit, &id, InclusionChange::Toggle)?;
        }
        Some(Commands::Move { id, direction }) => {
            handle_move_command(&storage, &audit, &id, direction)?;
        }
        Some(Commands::Export { week, format, output }) => {
            handle_export_command(&storage, &settings, &audit, &week, format, output)?;
        }
        Some(Commands::Accounts) => {
            handle_accounts_command(&storage, &settings)?;
        }
        Some(Commands::Config) => {
            handle_config_command(&paths, &settings)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&audit, limit)?;
        }
        None => {
            println!("bordero - weekly payables schedule");
            println!();
            println!("Run 'bordero --help' for usage information.");
            println!("Run 'bordero init' to create a sample schedule.");
        }
    }

    Ok(())
}
