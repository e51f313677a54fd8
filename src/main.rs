//! Contactbook CLI - local address book with an interactive menu

use anyhow::Context;
use clap::{Parser, Subcommand};
use contactbook::config::{self, ContactbookConfig};
use contactbook::output::{self, emit_success, OutputMode};
use contactbook::ui::{self, Icons};
use contactbook::{ContactStore, Shell};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(version)]
#[command(about = "Single-user contact address book backed by a local SQLite file")]
#[command(long_about = r#"
Contactbook keeps contacts (name, email, phone, category) in one SQLite file.
Run without a command to open the interactive menu.

Example usage:
  contactbook
  contactbook --database ./book.db list
  contactbook search "example.com" --format json
  contactbook groups
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu (default)
    Shell,

    /// List every contact
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
        format: OutputMode,

        /// Show a table instead of one block per contact
        #[arg(long)]
        table: bool,
    },

    /// Search contacts by any field
    Search {
        /// Case-insensitive substring to look for
        term: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
        format: OutputMode,
    },

    /// Count contacts per category
    Groups {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
        format: OutputMode,
    },

    /// Write a config file naming the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the menu
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(config_path.as_path()))?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref());
    let theme = ui::theme();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init { force } => {
            let config = ContactbookConfig {
                database: Some(database.to_string_lossy().to_string()),
            };
            config::write_config(&config_path, &config, force)?;
            println!("{}", ui::success(theme, &format!("Wrote {}", config_path.display())));
            println!("{}", ui::info(theme, "Database", &database.to_string_lossy()));
        }

        Commands::Shell => with_store(&database, |store| {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Shell::new(store, stdin.lock(), stdout.lock()).run()?;
            Ok(())
        })?,

        Commands::List { format, table } => with_store(&database, |store| {
            let contacts = store.list_all()?;
            if format.is_human() {
                println!("{} {}", Icons::BOOK, ui::header(theme, &format!("{} contact(s)", contacts.len())));
                if contacts.is_empty() {
                    println!("{}", ui::dim(theme, "No contacts found."));
                } else if table {
                    println!("{}", ui::contacts_table(&contacts));
                } else {
                    print!("{}", output::contact_listing(&contacts));
                }
            } else {
                emit_success(format, "list", output::list_payload(&contacts))?;
            }
            Ok(())
        })?,

        Commands::Search { term, format } => with_store(&database, |store| {
            if format.is_human() {
                println!("{} Searching for: '{}'...", Icons::SEARCH, term);
                let result = store.search(&term)?;
                if result.is_empty() {
                    println!("{}", ui::dim(theme, "No contacts found."));
                } else {
                    print!("{}", result);
                }
            } else {
                let contacts = store.search_contacts(&term)?;
                emit_success(format, "search", output::search_payload(&term, &contacts))?;
            }
            Ok(())
        })?,

        Commands::Groups { format } => with_store(&database, |store| {
            let groups = store.group_by_category()?;
            if format.is_human() {
                let heading = format!("{} contact(s) by category", store.count()?);
                println!("{} {}", Icons::FOLDER, ui::header(theme, &heading));
                if groups.is_empty() {
                    println!("{}", ui::dim(theme, "No contacts found."));
                } else {
                    println!("{}", ui::categories_table(&groups));
                }
            } else {
                emit_success(format, "groups", output::groups_payload(&groups))?;
            }
            Ok(())
        })?,
    }

    Ok(())
}

/// Open the store and run `f`; the store is closed on every path.
fn with_store<T>(
    database: &Path,
    f: impl FnOnce(&ContactStore) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    config::ensure_db_dir(database)?;
    let store = ContactStore::open(database)
        .with_context(|| format!("failed to open contact store at {}", database.display()))?;

    let result = store.scoped(f);
    tracing::debug!("{} Released {}", Icons::DATABASE, database.display());
    result
}
