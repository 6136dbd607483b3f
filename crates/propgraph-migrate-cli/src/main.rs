//! propgraph-migrate CLI - property graph to typed graph store migration.

use clap::{Parser, Subcommand};
use propgraph_migrate::{source, state, Config, MemoryStore, MigrateError, Orchestrator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn, Level};

/// File name of the target database snapshot.
const SNAPSHOT_FILE: &str = "graph.json";

#[derive(Parser)]
#[command(name = "propgraph-migrate")]
#[command(about = "Migrate a property graph into a strongly-typed graph store")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the target database from the source graph
    Run {
        /// Override the source graph file
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Skip the index phase
        #[arg(long)]
        no_indexes: bool,

        /// Output JSON result to stdout
        #[arg(long)]
        output_json: bool,
    },

    /// Check whether the target database is stale relative to the source
    Check,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), MigrateError> {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity);

    let mut config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run {
            graph,
            no_indexes,
            output_json,
        } => {
            if let Some(graph) = graph {
                config.source.graph = graph;
            }
            run_migration(&config, no_indexes, output_json)
        }
        Commands::Check => check_staleness(&config),
    }
}

fn run_migration(config: &Config, no_indexes: bool, output_json: bool) -> Result<(), MigrateError> {
    let graph = source::json::load(&config.source.graph)?;

    let database_dir = &config.target.database;
    if database_dir.exists() {
        info!("Removing old database...");
        std::fs::remove_dir_all(database_dir)?;
    }

    let create_indexes = config.migration.create_indexes && !no_indexes;
    let mut orchestrator =
        Orchestrator::new(graph, MemoryStore::new()).with_indexes(create_indexes);
    let result = orchestrator.run()?;
    let store = orchestrator.into_store();

    std::fs::create_dir_all(database_dir)?;
    store.save(database_dir.join(SNAPSHOT_FILE))?;

    info!("Updating workspace database checksum...");
    let checksum = state::source_checksum(&config.source.graph)?;
    state::write_checksum(database_dir, &checksum)?;

    if output_json {
        println!("{}", result.to_json()?);
    } else {
        println!(
            "Migrated {} nodes and {} edges into {} vertex types and {} edge types ({} indices)",
            result.nodes_created,
            result.edges_created,
            result.vertex_types,
            result.edge_types,
            result.indices_created
        );
        if !result.properties_skipped.is_empty() {
            println!(
                "Dropped {} properties; rerun with --verbosity debug for details",
                result.properties_skipped.len()
            );
        }
    }
    Ok(())
}

fn check_staleness(config: &Config) -> Result<(), MigrateError> {
    if state::is_stale(&config.target.database, &config.source.graph)? {
        warn!("The target database is out-of-date and should be recreated with the run command");
        println!("stale");
    } else {
        println!("up-to-date");
    }
    Ok(())
}

fn setup_logging(verbosity: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
