use tablesmith_core::Row;

/// Rows as a pretty-printed JSON array of objects.
pub fn rows_to_json(rows: &[Row]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
