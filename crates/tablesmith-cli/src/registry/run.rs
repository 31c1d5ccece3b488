use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tablesmith_codegen::TargetShape;
use tablesmith_core::DialectKind;
use tablesmith_generate::GeneratedArtifact;
use tablesmith_generate::output::write_rows_csv;

use super::RegistryResult;

/// Metadata captured when a generation run starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub out_dir: PathBuf,
    pub source: PathBuf,
    pub dialect: DialectKind,
    pub targets: Vec<TargetShape>,
    pub seed: Option<u64>,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    source: String,
    dialect: DialectKind,
    targets: &'a [TargetShape],
    seed: Option<u64>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub schema_path: PathBuf,
    pub create_sql_path: PathBuf,
    pub insert_sql_path: PathBuf,
    pub data_json_path: PathBuf,
    pub data_csv_path: PathBuf,
}

/// Create `<out_dir>/<timestamp>__run_<id>/` and write its `config.json`.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.out_dir.join(format!("{timestamp}__run_{}", ctx.run_id));
    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        source: ctx.source.display().to_string(),
        dialect: ctx.dialect,
        targets: &ctx.targets,
        seed: ctx.seed,
    };
    write_json(&root.join("config.json"), &config)?;

    Ok(RunPaths {
        schema_path: root.join("schema.json"),
        create_sql_path: root.join("create_table.sql"),
        insert_sql_path: root.join("insert.sql"),
        data_json_path: root.join("data.json"),
        data_csv_path: root.join("data.csv"),
        root,
    })
}

/// Write every part of `artifact` into the run directory; returns the paths
/// of the code files.
pub fn write_artifact(
    paths: &RunPaths,
    artifact: &GeneratedArtifact,
) -> RegistryResult<Vec<PathBuf>> {
    write_json(&paths.schema_path, &artifact.table_schema)?;
    write_text(&paths.create_sql_path, &artifact.create_sql)?;
    write_text(&paths.insert_sql_path, &artifact.insert_sql)?;
    write_text(&paths.data_json_path, &artifact.data_json)?;
    write_rows_csv(&paths.data_csv_path, &artifact.table_schema, &artifact.rows)?;

    artifact
        .code
        .iter()
        .map(|code| {
            let path = paths.root.join(&code.file_name);
            write_text(&path, &code.content)?;
            Ok(path)
        })
        .collect()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new().create(true).truncate(true).write(true).open(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

fn write_text(path: &Path, content: &str) -> RegistryResult<()> {
    let mut file = OpenOptions::new().create(true).truncate(true).write(true).open(path)?;
    file.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    Ok(())
}
