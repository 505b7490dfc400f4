use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ac_cli::adapters::Mode;
use ac_cli::commands::query_ops::QueryOptions;
use ac_cli::commands::{config_ops, query_ops};
use ac_engine::settings::settings;
use ac_engine::{EngineKind, WeightPolicy};

#[derive(Parser)]
#[command(name = "actool", about = "Weighted prefix autocomplete diagnostics")]
struct Cli {
    /// Log engine operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write engine spans as JSON lines into this directory (needs the `trace` feature)
    #[arg(long, global = true, conflicts_with = "verbose")]
    trace_dir: Option<PathBuf>,
    /// Settings TOML replacing the built-in defaults
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct EngineArgs {
    /// How lines of the input file become unit sequences
    #[arg(long, value_enum, default_value = "letters")]
    mode: Mode,
    /// Tree layout: simple or compressed (default from settings)
    #[arg(long)]
    engine: Option<EngineKind>,
    /// Branch weight policy: sum or average (default from settings)
    #[arg(long)]
    policy: Option<WeightPolicy>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the heaviest values starting with a prefix
    Query {
        /// Input text file
        file: String,
        /// Prefix to complete
        prefix: String,
        #[command(flatten)]
        args: EngineArgs,
        /// Maximum number of results (default from settings)
        #[arg(short, long)]
        n: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Remove every value under a prefix, then run a query
    Remove {
        /// Input text file
        file: String,
        /// Prefix to remove
        prefix: String,
        /// Prefix to complete after removal
        query: String,
        #[command(flatten)]
        args: EngineArgs,
        /// Maximum number of results (default from settings)
        #[arg(short, long)]
        n: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the loaded tree
    Dump {
        /// Input text file
        file: String,
        #[command(flatten)]
        args: EngineArgs,
    },
    /// Value count, root weight and node counts of both layouts
    Stats {
        /// Input text file
        file: String,
        /// How lines of the input file become unit sequences
        #[arg(long, value_enum, default_value = "letters")]
        mode: Mode,
        /// Branch weight policy: sum or average (default from settings)
        #[arg(long)]
        policy: Option<WeightPolicy>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to settings TOML file
        file: String,
    },
}

fn options(args: &EngineArgs, n: Option<usize>, json: bool) -> QueryOptions {
    let s = settings();
    QueryOptions {
        mode: args.mode,
        kind: args.engine.unwrap_or(s.engine.kind),
        policy: args.policy.unwrap_or(s.engine.policy),
        limit: n.unwrap_or(s.query.default_limit),
        json,
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("ac_core=debug,ac_cli=debug")),
            )
            .init();
    }
    if let Some(dir) = &cli.trace_dir {
        if let Err(e) = ac_engine::init_tracing(dir) {
            eprintln!("cannot start tracing in {}: {e}", dir.display());
            std::process::exit(1);
        }
    }
    if let Some(file) = &cli.config {
        config_ops::load_config(file);
    }

    match cli.command {
        Command::Query {
            file,
            prefix,
            args,
            n,
            json,
        } => query_ops::query(&file, &prefix, &options(&args, n, json)),
        Command::Remove {
            file,
            prefix,
            query,
            args,
            n,
            json,
        } => query_ops::remove(&file, &prefix, &query, &options(&args, n, json)),
        Command::Dump { file, args } => query_ops::dump(&file, &options(&args, None, false)),
        Command::Stats {
            file,
            mode,
            policy,
            json,
        } => {
            let policy = policy.unwrap_or(settings().engine.policy);
            query_ops::stats(&file, mode, policy, json)
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
