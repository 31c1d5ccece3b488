use schemars::schema_for;
use tablesmith_core::TableSchema;

#[test]
fn sample_document_matches_json_schema() {
    let schema = serde_json::to_value(schema_for!(TableSchema)).expect("serialize json schema");
    let document = serde_json::json!({
        "tableName": "user",
        "tableComment": "users",
        "mockRowCount": 30,
        "fields": [
            {
                "fieldName": "id",
                "fieldType": "bigint",
                "nullable": false,
                "primaryKey": true,
                "autoIncrement": true,
                "mockType": "increase",
                "mockParams": "100"
            },
            {
                "fieldName": "email",
                "fieldType": "varchar(128)",
                "mockType": "random",
                "mockParams": "email"
            }
        ]
    });

    assert!(jsonschema::is_valid(&schema, &document));
}

#[test]
fn json_schema_names_mock_types() {
    let schema = serde_json::to_string(&schema_for!(TableSchema)).expect("serialize json schema");
    for label in ["none", "fixed", "random", "rule", "dict", "increase"] {
        assert!(schema.contains(&format!("\"{label}\"")), "missing {label}");
    }
}

#[test]
fn wrong_row_count_type_is_rejected() {
    let schema = serde_json::to_value(schema_for!(TableSchema)).expect("serialize json schema");
    let document = serde_json::json!({
        "tableName": "user",
        "mockRowCount": "many",
        "fields": []
    });

    assert!(!jsonschema::is_valid(&schema, &document));
}
