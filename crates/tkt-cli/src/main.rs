use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tkt")]
#[command(about = "Ticket scanning station CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> site -> station)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Fixed local time (YYYY-MM-DDTHH:MM:SS) used instead of the clock
    #[arg(long, global = true)]
    at: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a scanned ticket code
    Scan { code: String },

    /// Record a scanned code as a cancelled ticket
    Cancel { code: String },

    /// Print per-status totals for the current shift
    Stats,

    /// Print every folio of the shift range, missing ones with a camera window
    Summary,

    /// Print the quick missing-ticket summary
    Missing,

    /// Print the 32-column closing slip
    Slip,

    /// Close the shift: write the report, reset, switch to the next shift
    Close,

    /// Print a deterministic sequence of test codes
    Generate {
        #[arg(long, default_value_t = 10)]
        count: u32,

        /// Folio to leave out (simulates a lost ticket)
        #[arg(long)]
        skip: Option<u32>,

        /// Base time; folio N is stamped N steps later (defaults to --at / now)
        #[arg(long)]
        start: Option<String>,

        #[arg(long, default_value_t = 3)]
        step_minutes: i64,

        /// Emit HHMMSS-FFF-MMMM.CC instead of the standard format
        #[arg(long, default_value_t = false)]
        compact: bool,
    },

    /// Check that a code is exactly in the standard format
    Validate { code: String },

    /// Compute layered config hash + print canonical JSON
    ConfigHash,
}

fn main() -> Result<()> {
    // dev-time .env.local bootstrap; absent file is fine
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    let now = commands::resolve_now(cli.at.as_deref())?;

    match cli.cmd {
        Commands::Scan { code } => commands::station::scan(&cli.config_paths, &code, now, false),
        Commands::Cancel { code } => commands::station::scan(&cli.config_paths, &code, now, true),
        Commands::Stats => commands::station::stats(&cli.config_paths),
        Commands::Summary => commands::station::summary(&cli.config_paths),
        Commands::Missing => commands::station::missing(&cli.config_paths),
        Commands::Slip => commands::station::slip(&cli.config_paths, now),
        Commands::Close => commands::station::close(&cli.config_paths, now),
        Commands::Generate {
            count,
            skip,
            start,
            step_minutes,
            compact,
        } => {
            let base = match start {
                Some(s) => commands::parse_local_time(&s)?,
                None => now,
            };
            commands::codes::generate(count, skip, base, step_minutes, compact)
        }
        Commands::Validate { code } => commands::codes::validate(&code),
        Commands::ConfigHash => commands::config_hash(&cli.config_paths),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
