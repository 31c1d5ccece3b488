use tablesmith_core::{Dictionary, Error, Field, Result, TableSchema};
use tracing::{info, warn};

use crate::DEFAULT_TABLE_NAME;

/// Largest number of words accepted by [`from_word_list`].
pub const MAX_WORDS: usize = 20;

/// Build a schema with one field per word in `text`.
///
/// Words are separated by ASCII or full-width commas. Each word is looked up
/// in the dictionary by definition name, then by column name; a word with no
/// stored definition becomes a `text` field named after the word.
pub fn from_word_list(text: &str, dictionary: &dyn Dictionary) -> Result<TableSchema> {
    let words: Vec<String> = text
        .split([',', '，'])
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    if words.is_empty() {
        return Err(Error::Validation("word list is empty".to_string()));
    }
    if words.len() > MAX_WORDS {
        return Err(Error::Validation(format!(
            "word list has {} entries, at most {MAX_WORDS} allowed",
            words.len()
        )));
    }

    let definitions = dictionary.find_by_names(&words)?;
    let fields = words
        .iter()
        .map(|word| {
            let found = definitions
                .iter()
                .find(|def| def.name == *word)
                .or_else(|| definitions.iter().find(|def| def.field_name == *word));
            match found {
                Some(def) => match serde_json::from_str::<Field>(&def.content) {
                    Ok(field) => field,
                    Err(err) => {
                        warn!(
                            word = %word,
                            error = %err,
                            "stored field definition not decodable"
                        );
                        default_field(word)
                    }
                },
                None => default_field(word),
            }
        })
        .collect::<Vec<_>>();

    let matched = definitions.len();
    let mut schema = TableSchema::new(DEFAULT_TABLE_NAME, fields);
    schema.table_comment = Some("Auto-generated table".to_string());
    info!(fields = schema.fields.len(), matched, "schema built from word list");
    Ok(schema)
}

fn default_field(word: &str) -> Field {
    let mut field = Field::new(word, "text");
    field.comment = Some(word.to_string());
    field
}
