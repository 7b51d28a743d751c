mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use menuport_types::KeyMode;

#[derive(Parser)]
#[command(
    name = "menuport",
    version,
    about = "Menu CSV importer for Cloud Firestore"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Import menu rows into the target collection
    Import {
        /// Path to the delimited input file
        #[arg(long, default_value = "menu.csv")]
        input: PathBuf,
        /// Target collection name
        #[arg(long, default_value = "menuItems")]
        collection: String,
        /// Service-account key file (skips directory discovery)
        #[arg(long)]
        credentials: Option<PathBuf>,
        /// Document key derivation
        #[arg(long, value_enum, default_value = "dish")]
        key: KeyArg,
        /// Map and count rows without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate credentials, input file, and collection connectivity
    Check {
        /// Path to the delimited input file
        #[arg(long, default_value = "menu.csv")]
        input: PathBuf,
        /// Target collection name
        #[arg(long, default_value = "menuItems")]
        collection: String,
        /// Service-account key file (skips directory discovery)
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
}

/// CLI spelling of the document key derivation.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeyArg {
    /// Raw dish name (compatible with existing document ids)
    Dish,
    /// {category}_{dishName}
    Composite,
}

impl From<KeyArg> for KeyMode {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Dish => KeyMode::DishName,
            KeyArg::Composite => KeyMode::CategoryDish,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Import {
            input,
            collection,
            credentials,
            key,
            dry_run,
        } => commands::import::execute(
            &input,
            &collection,
            credentials.as_deref(),
            key.into(),
            dry_run,
        ),
        Commands::Check {
            input,
            collection,
            credentials,
        } => commands::check::execute(&input, &collection, credentials.as_deref()),
    }
}
