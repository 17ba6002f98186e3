//! Registry Composer CLI
//!
//! Command-line interface for composing, validating and submitting registry
//! write requests.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use registry_composer::{
    load_json, load_records, load_records_async, normalize, render_example, render_failure,
    render_load_error, render_rules, render_transport_error, validate_batch, DisplayConfig,
    Draft, EntityType, HttpRegistry, Operation, RegistryApi, RegistryConfig,
};

const PROGRAM: &str = "registry-composer";

#[derive(Parser)]
#[command(name = "registry-composer")]
#[command(about = "Compose, validate and submit compliance registry write requests")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    display: DisplayArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Display overrides; unset flags fall back to REGISTRY_* environment variables.
#[derive(Args)]
struct DisplayArgs {
    /// Omit null fields from responses (default: true)
    #[arg(long, global = true, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    hide_nulls: Option<bool>,

    /// Render epoch seconds under date fields as timestamps (default: false)
    #[arg(long, global = true, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    epoch_to_datetime: Option<bool>,

    /// Print registry responses exactly as received (default: false)
    #[arg(long, global = true, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    debugging: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create records with a bulk POST
    Post(WriteArgs),

    /// Update records with a bulk PUT
    Put(WriteArgs),

    /// Compose and validate records without contacting the registry
    Validate {
        /// Entity type of the records
        entity: Entity,

        /// Operation to validate for
        #[arg(long, short, value_enum)]
        op: Op,

        /// JSON file holding one record or an array of records
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Print the expected record shape and business rules for an entity type
    Example {
        /// Entity type
        entity: Entity,

        /// Operation to describe
        #[arg(long, short, value_enum, default_value = "add")]
        op: Op,
    },

    /// Normalize a saved registry response for display
    Format {
        /// Response file
        response: PathBuf,
    },
}

#[derive(Args)]
struct WriteArgs {
    /// Entity type of the records
    entity: Entity,

    /// Numeric system identifier in the registry
    #[arg(long, short = 's')]
    system_id: u64,

    /// JSON file holding one record or an array of records
    #[arg(long, short)]
    file: PathBuf,

    /// Print the composed request body instead of submitting it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Entity {
    Poams,
    Controls,
    Hardware,
    Software,
    Artifacts,
    CloudResources,
    ContainerScans,
    StaticScans,
}

impl From<Entity> for EntityType {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Poams => EntityType::Poams,
            Entity::Controls => EntityType::Controls,
            Entity::Hardware => EntityType::Hardware,
            Entity::Software => EntityType::Software,
            Entity::Artifacts => EntityType::Artifacts,
            Entity::CloudResources => EntityType::CloudResources,
            Entity::ContainerScans => EntityType::ContainerScans,
            Entity::StaticScans => EntityType::StaticScans,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Op {
    Add,
    Update,
}

impl From<Op> for Operation {
    fn from(op: Op) -> Self {
        match op {
            Op::Add => Operation::Add,
            Op::Update => Operation::Update,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Post(args) => run_write(Operation::Add, args, &cli.display).await,
        Commands::Put(args) => run_write(Operation::Update, args, &cli.display).await,
        Commands::Validate { entity, op, file } => run_validate(entity.into(), op.into(), &file),
        Commands::Example { entity, op } => run_example(entity.into(), op.into()),
        Commands::Format { response } => run_format(&response, &cli.display),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

async fn run_write(operation: Operation, args: WriteArgs, display: &DisplayArgs) -> Result<(), u8> {
    let WriteArgs {
        entity,
        system_id,
        file,
        dry_run,
    } = args;
    let entity = EntityType::from(entity);
    let display = display_config(display)?;

    let records = load_records_async(&file).await.map_err(|e| {
        eprint!("{}", render_load_error(&e));
        e.exit_code() as u8
    })?;

    // The whole batch is validated before configuration is read or any call made
    let drafts = validate_batch(entity, operation, &records).map_err(|failure| {
        eprint!("{}", render_failure(&failure, PROGRAM));
        failure.exit_code() as u8
    })?;

    if dry_run {
        return print_json(&drafts_value(drafts));
    }

    let config = RegistryConfig::from_env().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let registry = HttpRegistry::new(&config).map_err(|e| {
        eprint!("{}", render_transport_error(&e));
        e.exit_code() as u8
    })?;

    let response = registry
        .submit(entity, operation, system_id, &drafts)
        .await
        .map_err(|e| {
            eprint!("{}", render_transport_error(&e));
            e.exit_code() as u8
        })?;

    print_json(&normalize(&response, &display))
}

fn run_validate(entity: EntityType, operation: Operation, file: &Path) -> Result<(), u8> {
    let records = load_records(file).map_err(|e| {
        eprint!("{}", render_load_error(&e));
        e.exit_code() as u8
    })?;

    let drafts = validate_batch(entity, operation, &records).map_err(|failure| {
        eprint!("{}", render_failure(&failure, PROGRAM));
        failure.exit_code() as u8
    })?;

    eprintln!(
        "{}",
        format!("✓ {} record(s) valid for {} {}", drafts.len(), operation, entity).green()
    );
    print_json(&drafts_value(drafts))
}

fn run_example(entity: EntityType, operation: Operation) -> Result<(), u8> {
    if !entity.supports(operation) {
        eprintln!("Error: {} does not support {}", entity, operation);
        return Err(2);
    }

    println!("{}", render_example(entity, operation));
    let rules = render_rules(entity, operation);
    if !rules.is_empty() {
        println!();
        print!("{}", rules);
    }
    Ok(())
}

fn run_format(path: &Path, display: &DisplayArgs) -> Result<(), u8> {
    let display = display_config(display)?;
    let response = load_json(path).map_err(|e| {
        eprint!("{}", render_load_error(&e));
        e.exit_code() as u8
    })?;
    print_json(&normalize(&response, &display))
}

/// Environment display settings with command-line overrides applied.
fn display_config(args: &DisplayArgs) -> Result<DisplayConfig, u8> {
    let mut config = DisplayConfig::from_env().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if let Some(hide_nulls) = args.hide_nulls {
        config.suppress_nulls = hide_nulls;
    }
    if let Some(epoch_to_datetime) = args.epoch_to_datetime {
        config.render_dates_from_epoch = epoch_to_datetime;
    }
    if let Some(debugging) = args.debugging {
        config.debugging = debugging;
    }
    Ok(config)
}

fn drafts_value(drafts: Vec<Draft>) -> Value {
    Value::Array(drafts.into_iter().map(Draft::into_value).collect())
}

fn print_json(value: &Value) -> Result<(), u8> {
    let output = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    println!("{}", output);
    Ok(())
}
