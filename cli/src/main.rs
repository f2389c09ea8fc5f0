mod commands;
mod config;
mod svg;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    EditArgs, cmd_catalog, cmd_chart, cmd_clear, cmd_delete, cmd_export, cmd_history, cmd_import,
    cmd_log, cmd_show,
};
use crate::config::Config;
use vitalog_core::db::Database;

#[derive(Parser)]
#[command(
    name = "vitalog",
    version,
    about = "A local-first daily health and supplement tracker",
    long_about = "\n\n  ██╗   ██╗██╗████████╗ █████╗ ██╗      ██████╗  ██████╗
  ██║   ██║██║╚══██╔══╝██╔══██╗██║     ██╔═══██╗██╔════╝
  ██║   ██║██║   ██║   ███████║██║     ██║   ██║██║  ███╗
  ╚██╗ ██╔╝██║   ██║   ██╔══██║██║     ██║   ██║██║   ██║
   ╚████╔╝ ██║   ██║   ██║  ██║███████╗╚██████╔╝╚██████╔╝
    ╚═══╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚══════╝ ╚═════╝  ╚═════╝
            one day, one record.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record or update the log for a day
    Log {
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        #[command(flatten)]
        edit: EditArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the log for a day (default: today)
    Show {
        /// Date to show (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List logged days, newest first
    History {
        /// Window in days, or "all"
        #[arg(short, long, default_value = "all")]
        days: String,
        /// Show at most this many days
        #[arg(short, long)]
        limit: Option<usize>,
        /// Filter by date, supplement, or exercise name
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render measurement and adherence charts as SVG
    Chart {
        /// Window in days, or "all"
        #[arg(short, long, default_value = "30")]
        days: String,
        /// Directory to write SVG files into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Print chart geometry as JSON instead of writing files
        #[arg(long)]
        json: bool,
    },
    /// Export all records
    Export {
        /// Output format: json or csv
        #[arg(short, long, default_value = "json")]
        format: String,
        /// File to write to (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Import records from a JSON export, merging with stored data
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the log for a single day
    Delete {
        /// Date to delete (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove many records at once
    Clear {
        /// Remove every record
        #[arg(long, conflicts_with_all = ["from", "to"])]
        all: bool,
        /// Start of the range to remove (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of the range to remove (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the supplement and exercise catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path)?;

    match cli.command {
        Commands::Log { date, edit, json } => cmd_log(&db, date, edit, json),
        Commands::Show { date, json } => cmd_show(&db, date, json),
        Commands::History {
            days,
            limit,
            search,
            json,
        } => cmd_history(&db, &days, limit, search.as_deref(), json),
        Commands::Chart { days, out, json } => cmd_chart(&db, &days, &out, json),
        Commands::Export { format, out } => cmd_export(&db, &format, out.as_deref()),
        Commands::Import { file, json } => cmd_import(&db, &file, json),
        Commands::Delete { date, json } => cmd_delete(&db, date, json),
        Commands::Clear {
            all,
            from,
            to,
            json,
        } => cmd_clear(&db, all, from.as_deref(), to.as_deref(), json),
        Commands::Catalog { json } => cmd_catalog(json),
    }
}
