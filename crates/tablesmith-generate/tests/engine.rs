use std::sync::Arc;

use regex::Regex;
use serde_json::json;
use tablesmith_codegen::{HandlebarsRenderer, TargetShape};
use tablesmith_core::{DialectKind, Error, InMemoryDictionary, TableSchema};
use tablesmith_generate::{GenerateOptions, GenerationEngine, GenerationError};

fn user_schema(rows: Option<u32>) -> TableSchema {
    serde_json::from_value(json!({
        "dbName": "shop",
        "tableName": "user_account",
        "tableComment": "accounts",
        "mockRowCount": rows,
        "fields": [
            { "fieldName": "id", "fieldType": "bigint", "nullable": false, "primaryKey": true, "autoIncrement": true },
            { "fieldName": "seq", "fieldType": "int", "mockType": "increase", "mockParams": "100" },
            { "fieldName": "code", "fieldType": "varchar(8)", "mockType": "rule", "mockParams": "^[A-Z]{3}$" },
            { "fieldName": "email", "fieldType": "varchar(64)", "mockType": "random", "mockParams": "email" },
            { "fieldName": "color", "fieldType": "varchar(16)", "mockType": "dict", "mockParams": "7" },
            { "fieldName": "level", "fieldType": "int", "mockType": "fixed", "mockParams": "3" },
            { "fieldName": "note", "fieldType": "text", "defaultValue": "n/a" }
        ]
    }))
    .expect("decode schema")
}

fn engine(seed: Option<u64>) -> GenerationEngine {
    let dictionary = InMemoryDictionary::new().with_dict(7, "colors", r#"["red","green","blue"]"#);
    let options = GenerateOptions {
        seed,
        ..GenerateOptions::default()
    };
    GenerationEngine::new(
        options,
        Arc::new(dictionary),
        Arc::new(HandlebarsRenderer::new().expect("renderer")),
    )
}

#[test]
fn rows_have_every_field_in_schema_order() {
    let schema = user_schema(None);
    let names: Vec<_> = schema.fields.iter().map(|f| f.field_name.clone()).collect();
    let engine = engine(Some(1));
    for rows in [10, 37, 100] {
        let generated = engine.generate_rows(&schema, rows).expect("rows");
        assert_eq!(generated.len(), rows);
        for row in &generated {
            assert_eq!(row.keys().collect::<Vec<_>>(), names);
        }
    }
}

#[test]
fn generate_all_uses_default_row_count() {
    let artifact = engine(Some(2)).generate_all(user_schema(None)).expect("generate");
    assert_eq!(artifact.table_schema.mock_row_count, Some(20));
    assert_eq!(artifact.rows.len(), 20);

    let first = &artifact.rows[0];
    assert_eq!(first.get("id"), Some("1"));
    assert_eq!(artifact.rows[19].get("id"), Some("20"));
    assert_eq!(first.get("seq"), Some("100"));
    assert_eq!(first.get("level"), Some("3"));
    assert_eq!(first.get("note"), Some("n/a"));
    let code = Regex::new("^[A-Z]{3}$").expect("regex");
    assert!(artifact.rows.iter().all(|row| code.is_match(row.get("code").unwrap_or_default())));
    assert!(artifact
        .rows
        .iter()
        .all(|row| ["red", "green", "blue"].contains(&row.get("color").unwrap_or_default())));

    assert!(artifact.create_sql.contains("CREATE TABLE IF NOT EXISTS `shop`.`user_account` ("));
    assert_eq!(artifact.insert_sql.lines().count(), 20);

    let data: serde_json::Value = serde_json::from_str(&artifact.data_json).expect("data json");
    assert_eq!(data.as_array().map(Vec::len), Some(20));
    assert_eq!(data[0]["seq"], "100");

    let shapes: Vec<_> = artifact.code.iter().map(|c| c.shape).collect();
    assert_eq!(shapes, TargetShape::ALL.to_vec());
    assert!(artifact.code[1].content.contains("userAccount.setSeq(100);"));
}

#[test]
fn insert_lists_only_explicitly_mocked_fields() {
    let artifact = engine(Some(3)).generate_all(user_schema(Some(10))).expect("generate");
    let first = artifact.insert_sql.lines().next().expect("insert line");
    assert!(first.starts_with(
        "INSERT INTO `shop`.`user_account` (`seq`, `code`, `email`, `color`, `level`) VALUES (100, '"
    ));
    assert!(!first.contains("`id`"));
    assert!(!first.contains("`note`"));
    assert!(first.ends_with(", 3);"));
}

#[test]
fn insert_with_only_none_mock_types_has_empty_lists() {
    let schema: TableSchema = serde_json::from_value(json!({
        "tableName": "t",
        "mockRowCount": 10,
        "fields": [{ "fieldName": "a", "fieldType": "int", "mockType": "none" }]
    }))
    .expect("decode schema");
    let artifact = engine(Some(4)).generate_all(schema).expect("generate");
    assert_eq!(artifact.insert_sql.lines().next(), Some("INSERT INTO `t` () VALUES ();"));
}

#[test]
fn validation_failure_produces_nothing() {
    for rows in [5, 150] {
        let err = engine(None)
            .generate_all(user_schema(Some(rows)))
            .expect_err("out of range");
        assert!(matches!(err, GenerationError::Schema(Error::Validation(_))));
    }
    let err = engine(None)
        .generate_all(TableSchema::new("empty", Vec::new()))
        .expect_err("no fields");
    assert!(matches!(err, GenerationError::Schema(Error::Validation(_))));
}

#[test]
fn generator_failure_aborts_the_run() {
    let mut schema = user_schema(Some(10));
    schema.fields[4].mock_params = Some("404".to_string());
    let err = engine(Some(5)).generate_all(schema).expect_err("unknown dict");
    assert!(matches!(err, GenerationError::GenerationData(_)));
}

#[test]
fn options_are_kept_as_configured() {
    let engine = engine(Some(11));
    assert_eq!(engine.options().seed, Some(11));
    assert_eq!(engine.options().dialect, DialectKind::MySql);
    assert_eq!(engine.options().targets, TargetShape::ALL.to_vec());
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = engine(Some(42)).generate_rows(&user_schema(None), 15).expect("rows");
    let second = engine(Some(42)).generate_rows(&user_schema(None), 15).expect("rows");
    assert_eq!(first, second);
}

#[test]
fn parallel_runs_match_sequential_runs() {
    let schemas: Vec<TableSchema> = (0..6)
        .map(|index| {
            let mut schema = user_schema(Some(10 + index));
            schema.table_name = format!("table_{index}");
            schema
        })
        .collect();
    let engine = Arc::new(engine(Some(7)));

    let sequential: Vec<_> = schemas
        .iter()
        .map(|schema| engine.generate_all(schema.clone()).expect("generate"))
        .collect();

    let handles: Vec<_> = schemas
        .iter()
        .cloned()
        .map(|schema| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.generate_all(schema).expect("generate"))
        })
        .collect();
    let parallel: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();

    for (left, right) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(left.table_schema, right.table_schema);
        assert_eq!(left.create_sql, right.create_sql);
        assert_eq!(left.rows, right.rows);
        assert_eq!(left.insert_sql, right.insert_sql);
    }
}

#[test]
fn generate_insert_sql_composes_rows_and_ddl() {
    let schema = user_schema(None);
    let sql = engine(Some(8)).generate_insert_sql(&schema, 12).expect("insert sql");
    assert_eq!(sql.lines().count(), 12);
    assert!(sql.lines().all(|line| line.starts_with("INSERT INTO `shop`.`user_account`")));
}
