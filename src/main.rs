use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_reconciler::cli::{handle_budget_command, BudgetCommands};
use budget_reconciler::config::{paths::ReconcilerPaths, settings::Settings};
use budget_reconciler::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetrec",
    version,
    about = "Monthly category budgets with spend tracking and auto-generation",
    long_about = "budgetrec keeps one budget per spending category per month, \
                  compares each month's spend against its budgets, and can \
                  fill in a new month from the month before it."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Budget(BudgetCommands),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    budget_reconciler::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ReconcilerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing budgetrec at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Add categories and transactions to:");
            println!("  {}", paths.categories_file().display());
            println!("  {}", paths.transactions_file().display());
        }
        Some(Commands::Config) => {
            println!("budgetrec Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  Excluded from auto-generation: {}",
                settings.excluded_category_patterns.join(", ")
            );
        }
        None => {
            println!("budgetrec - monthly category budgets");
            println!();
            println!("Run 'budgetrec --help' for usage information.");
            println!("Run 'budgetrec summary' to see this month's totals.");
        }
    }

    Ok(())
}
