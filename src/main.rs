use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use rai_scope::config::{self, presets, Config};
use rai_scope::dataset::RawTable;
use rai_scope::output;
use rai_scope::{evaluate, EvaluateOptions, Error, ScoredDataset};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_WEIGHTS: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug, Default)]
struct DataArgs {
    /// Dataset file (.json, or YAML otherwise); uses the built-in demo locations if omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Override a weight, e.g. --weight "GDP ($B)=40" (repeatable)
    #[arg(short, long = "weight", value_name = "NAME=VALUE")]
    weights: Vec<String>,

    /// Average records sharing an identifier before scoring
    #[arg(long)]
    aggregate: bool,
}

#[derive(Args, Debug, Default)]
struct RankArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Only show the best N entities
    #[arg(short, long)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Show RAI rescaled to 0-100 (overrides the config setting)
    #[arg(long)]
    display_scale: Option<bool>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank entities by RAI (default if no subcommand)
    Rank(RankArgs),
    /// Print headline statistics for a scoring pass
    Summary(DataArgs),
    /// Check a dataset against the configured schema without scoring it
    Validate {
        /// Dataset file; uses the built-in demo locations if omitted
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Write the default config file
    Init {
        /// Where to write it (defaults to ~/.config/rai-scope/config.yaml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "rai-scope")]
#[command(about = "Rank locations by Relative Attractiveness Index", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rai-scope/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Rank(RankArgs::default()));
    let start_time = Instant::now();

    match command {
        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(config::get_config_path);
            if path.exists() && !force {
                eprintln!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
                std::process::exit(EXIT_CONFIG);
            }
            if let Err(e) = config::save_config(&path, &Config::default()) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Wrote default config to {}", path.display());
        }
        Commands::Rank(args) => {
            let config = load_config_or_exit(cli.config, cli.verbose);
            let scored = score_or_exit(&config, &args.data);
            let use_colors = output::should_use_colors();
            let ranking = scored.ranked();
            let ranking = match args.top.or(config.top) {
                Some(n) => ranking.top(n),
                None => ranking,
            };
            let scale = args
                .display_scale
                .unwrap_or(config.display_scale)
                .then(|| scored.display_scale());

            match args.format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        output::format_ranked_table(&ranking, scale.as_ref(), use_colors)
                    );
                    if cli.verbose {
                        for entry in ranking.iter() {
                            println!();
                            println!(
                                "{:>2}. {}",
                                entry.rank,
                                output::format_breakdown(entry.scored, scale.as_ref(), use_colors)
                            );
                        }
                    }
                }
                OutputFormat::Tsv => {
                    let tsv = output::format_tsv(&ranking, scale.as_ref());
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => {
                    let summary = scored.summary();
                    match output::to_json(&ranking, scale.as_ref(), summary.as_ref()) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Failed to serialize results: {}", e);
                            std::process::exit(EXIT_DATA);
                        }
                    }
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} entities in {:?}", scored.len(), start_time.elapsed());
            }
        }
        Commands::Summary(args) => {
            let config = load_config_or_exit(cli.config, cli.verbose);
            let scored = score_or_exit(&config, &args);
            match scored.summary() {
                Some(summary) => println!(
                    "{}",
                    output::format_summary(&summary, output::should_use_colors())
                ),
                None => println!("No entities to summarize."),
            }
        }
        Commands::Validate { data } => {
            let config = load_config_or_exit(cli.config, cli.verbose);
            let table = load_table_or_exit(data);
            match rai_scope::validate(&table, &config.schema) {
                Ok(dataset) => println!(
                    "OK: {} entities, {} metrics ({} scoring)",
                    dataset.len(),
                    dataset.metrics().len(),
                    dataset.scoring_metrics().len()
                ),
                Err(report) => {
                    eprintln!("{}", report);
                    std::process::exit(EXIT_DATA);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate the config, exiting on any problem.
fn load_config_or_exit(path: Option<PathBuf>, verbose: bool) -> Config {
    let config = match config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if verbose {
        eprintln!(
            "Schema: {} metrics keyed by '{}'",
            config.schema.metrics.len(),
            config.schema.identifier
        );
    }

    config
}

fn load_table_or_exit(path: Option<PathBuf>) -> RawTable {
    match path {
        Some(path) => match config::load_table(&path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Data error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        },
        None => presets::demo_table(),
    }
}

fn score_or_exit(config: &Config, args: &DataArgs) -> ScoredDataset {
    let weights = match config::apply_weight_overrides(&config.weights, &args.weights) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Weight error: {:#}", e);
            std::process::exit(EXIT_WEIGHTS);
        }
    };
    let table = load_table_or_exit(args.data.clone());
    let options = EvaluateOptions {
        aggregate: args.aggregate || config.aggregate,
    };

    match evaluate(&table, &config.schema, &weights, options) {
        Ok(scored) => scored,
        Err(Error::Validation(report)) => {
            eprintln!("{}", report);
            std::process::exit(EXIT_DATA);
        }
        Err(Error::Scoring(e)) => {
            eprintln!("Weight error: {}", e);
            std::process::exit(EXIT_WEIGHTS);
        }
    }
}
