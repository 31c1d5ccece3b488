mod config;
mod dictionary;
mod registry;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{ConfigError, LogFormat, Settings, load_settings};
use dictionary::load_dictionary;
use registry::{RegistryError, RunContext, init_logging, start_run, write_artifact};
use tablesmith_codegen::{HandlebarsRenderer, RenderError, TargetShape};
use tablesmith_core::{DialectKind, Error as CoreError, MockType, TableSchema};
use tablesmith_generate::{GenerateOptions, GenerationEngine, GenerationError, RandomKind};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tablesmith", version, about = "Table schema, mock data and code generator")]
struct Cli {
    /// Path to a TOML config file (defaults to ./tablesmith.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    /// Log level filter, e.g. `info` or `tablesmith_generate=debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate DDL, rows and code from a schema JSON document.
    Generate(GenerateArgs),
    /// Build a schema from a CREATE TABLE statement.
    FromSql(FromSqlArgs),
    /// Build a schema from a comma separated word list.
    FromWords(FromWordsArgs),
    /// Build a schema from a CSV sample whose first row is the header.
    FromCsv(FromCsvArgs),
    /// List mock types and random subtypes.
    ListGenerators,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Schema JSON document.
    #[arg(long)]
    schema: PathBuf,
    /// Output directory for runs.
    #[arg(long)]
    out: Option<PathBuf>,
    /// SQL dialect for CREATE and INSERT statements.
    #[arg(long)]
    dialect: Option<DialectKind>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Code artifact to emit; repeat for several.
    #[arg(long = "target", value_name = "SHAPE")]
    targets: Vec<TargetShape>,
    /// Dictionary JSON file.
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Print the artifact as JSON instead of writing a run directory.
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

#[derive(Args, Debug)]
struct FromSqlArgs {
    /// File holding a CREATE TABLE statement.
    file: PathBuf,
    /// Dialect used to parse the statement.
    #[arg(long)]
    dialect: Option<DialectKind>,
    /// Write the schema here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FromWordsArgs {
    /// Words separated by `,` or `，`.
    words: String,
    /// Dictionary JSON file.
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Write the schema here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FromCsvArgs {
    /// CSV file; the first row is the header, the second the type sample.
    file: PathBuf,
    /// Write the schema here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    let format = cli.log_format.unwrap_or(settings.logging.format);
    init_logging(level, format)?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::FromSql(args) => run_from_sql(args, &settings),
        Command::FromWords(args) => run_from_words(args, &settings),
        Command::FromCsv(args) => run_from_csv(args),
        Command::ListGenerators => {
            list_generators();
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let GenerateArgs {
        schema: schema_path,
        out,
        dialect,
        seed,
        targets,
        dictionary,
        stdout,
    } = args;

    let schema: TableSchema = serde_json::from_str(&std::fs::read_to_string(&schema_path)?)?;
    let options = GenerateOptions {
        dialect: dialect.unwrap_or(settings.generate.dialect),
        targets: if targets.is_empty() {
            settings.generate.targets.clone()
        } else {
            targets
        },
        seed: seed.or(settings.generate.seed),
    };
    let dictionary_path = dictionary.or_else(|| settings.dictionary.path.clone());
    let dictionary = load_dictionary(dictionary_path.as_deref())?;

    let timer = Instant::now();
    let engine = GenerationEngine::new(
        options,
        Arc::new(dictionary),
        Arc::new(HandlebarsRenderer::new()?),
    );
    let artifact = engine.generate_all(schema)?;

    if stdout {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
        return Ok(());
    }

    let run_ctx = RunContext {
        run_id: Uuid::new_v4().to_string(),
        started_at: chrono::Utc::now(),
        out_dir: out.unwrap_or_else(|| settings.generate.out_dir.clone()),
        source: schema_path,
        dialect: engine.options().dialect,
        targets: engine.options().targets.clone(),
        seed: engine.options().seed,
    };
    let run_paths = start_run(&run_ctx)?;
    let code_paths = write_artifact(&run_paths, &artifact)?;

    tracing::info!(
        event = "run_finished",
        run_id = %run_ctx.run_id,
        path = %run_paths.root.display(),
        rows = artifact.rows.len(),
        code_files = code_paths.len(),
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("{}", run_paths.root.display());
    Ok(())
}

fn run_from_sql(args: FromSqlArgs, settings: &Settings) -> Result<(), CliError> {
    let sql = std::fs::read_to_string(&args.file)?;
    let dialect = args.dialect.unwrap_or(settings.generate.dialect);
    let schema = tablesmith_parse::from_ddl_with_dialect(&sql, dialect)?;
    print_schema(&schema, args.out.as_deref())
}

fn run_from_words(args: FromWordsArgs, settings: &Settings) -> Result<(), CliError> {
    let dictionary_path = args.dictionary.or_else(|| settings.dictionary.path.clone());
    let dictionary = load_dictionary(dictionary_path.as_deref())?;
    let schema = tablesmith_parse::from_word_list(&args.words, &dictionary)?;
    print_schema(&schema, args.out.as_deref())
}

fn run_from_csv(args: FromCsvArgs) -> Result<(), CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&args.file)?;
    let mut grid = Vec::with_capacity(2);
    for record in reader.records().take(2) {
        grid.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
    }
    let schema = tablesmith_parse::from_tabular_sample(&grid)?;
    print_schema(&schema, args.out.as_deref())
}

fn print_schema(schema: &TableSchema, out: Option<&Path>) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(schema)?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{encoded}\n"))?;
            tracing::info!(event = "schema_written", path = %path.display());
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

fn list_generators() {
    for mock_type in MockType::ALL {
        println!("{mock_type}");
    }
    let kinds: Vec<_> = RandomKind::ALL.iter().map(|kind| kind.as_str()).collect();
    println!("random: {}", kinds.join(", "));
}
