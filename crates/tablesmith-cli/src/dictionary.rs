use std::path::Path;

use tablesmith_core::InMemoryDictionary;
use tracing::{debug, warn};

use crate::config::ConfigResult;

/// Load a dictionary document `{ "dicts": [...], "fields": [...] }`.
///
/// No path, or a path that does not exist, gives an empty dictionary.
pub fn load_dictionary(path: Option<&Path>) -> ConfigResult<InMemoryDictionary> {
    let Some(path) = path else {
        return Ok(InMemoryDictionary::new());
    };
    if !path.exists() {
        warn!(path = %path.display(), "dictionary file not found, using empty dictionary");
        return Ok(InMemoryDictionary::new());
    }
    let content = std::fs::read_to_string(path)?;
    let dictionary: InMemoryDictionary = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        dicts = dictionary.dicts.len(),
        fields = dictionary.fields.len(),
        "dictionary loaded"
    );
    Ok(dictionary)
}
