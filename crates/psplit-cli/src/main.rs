use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "psplit")]
#[command(about = "Party income split calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the split for a snapshot file and print it
    Compute {
        /// Snapshot JSON (legacy index references are migrated on load)
        state: PathBuf,

        /// Output format: table | json (default from config, else table)
        #[arg(long)]
        format: Option<String>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Print the grouped clipboard payout text for a snapshot
    Summary {
        state: PathBuf,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Compute a snapshot and verify the allocation's conservation checks
    Check { state: PathBuf },

    /// Record book maintenance
    Records {
        #[command(subcommand)]
        cmd: RecordsCmd,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RecordsCmd {
    /// List records; the active one is marked with `*`
    List {
        #[arg(long)]
        book: PathBuf,
    },

    /// Compute and print the active record
    Show {
        #[arg(long)]
        book: PathBuf,

        #[arg(long)]
        format: Option<String>,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Append a blank record dated today and make it active
    Add {
        #[arg(long)]
        book: PathBuf,
    },

    /// Remove a record by id
    Remove {
        #[arg(long)]
        book: PathBuf,

        #[arg(long)]
        id: String,
    },

    /// Make a record active
    Select {
        #[arg(long)]
        book: PathBuf,

        #[arg(long)]
        id: String,
    },
}

impl Commands {
    /// Config layers this command reads, if any.
    fn config_paths(&self) -> &[String] {
        match self {
            Commands::Compute { config_paths, .. }
            | Commands::Summary { config_paths, .. }
            | Commands::Records {
                cmd: RecordsCmd::Show { config_paths, .. },
            } => config_paths.as_slice(),
            _ => &[],
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = commands::load_config(cli.cmd.config_paths())?;
    init_tracing(&cfg.log_filter);

    match cli.cmd {
        Commands::Compute { state, format, .. } => {
            let format = commands::resolve_format(format.as_deref(), &cfg)?;
            commands::split::compute(&state, format)
        }

        Commands::Summary { state, .. } => commands::split::summary(&state, &cfg),

        Commands::Check { state } => commands::split::check(&state),

        Commands::Records { cmd } => match cmd {
            RecordsCmd::List { book } => commands::records::list(&book),
            RecordsCmd::Show { book, format, .. } => {
                let format = commands::resolve_format(format.as_deref(), &cfg)?;
                commands::records::show(&book, format)
            }
            RecordsCmd::Add { book } => commands::records::add(&book),
            RecordsCmd::Remove { book, id } => commands::records::remove(&book, &id),
            RecordsCmd::Select { book, id } => commands::records::select(&book, &id),
        },

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = psplit_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(ExitCode::SUCCESS)
        }
    }
}
