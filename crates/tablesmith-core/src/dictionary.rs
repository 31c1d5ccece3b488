use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Stored word list; `content` is a JSON array of candidate strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictEntry {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub content: String,
}

/// Stored field definition; `content` is a JSON-encoded [`crate::Field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub field_name: String,
    pub content: String,
}

/// Lookup collaborator for dictionaries and reusable field definitions.
pub trait Dictionary: Send + Sync {
    fn get_by_id(&self, id: u64) -> Result<Option<DictEntry>>;

    /// Definitions whose `name` or `field_name` equals any of `names`.
    fn find_by_names(&self, names: &[String]) -> Result<Vec<FieldDefinition>>;
}

/// Dictionary held entirely in memory; loadable from a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDictionary {
    #[serde(default)]
    pub dicts: Vec<DictEntry>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dict(
        mut self,
        id: u64,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.dicts.push(DictEntry {
            id,
            name: name.into(),
            content: content.into(),
        });
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        field_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDefinition {
            name: name.into(),
            field_name: field_name.into(),
            content: content.into(),
        });
        self
    }
}

impl Dictionary for InMemoryDictionary {
    fn get_by_id(&self, id: u64) -> Result<Option<DictEntry>> {
        Ok(self.dicts.iter().find(|entry| entry.id == id).cloned())
    }

    fn find_by_names(&self, names: &[String]) -> Result<Vec<FieldDefinition>> {
        Ok(self
            .fields
            .iter()
            .filter(|def| {
                names
                    .iter()
                    .any(|name| *name == def.name || *name == def.field_name)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_names_matches_either_name() {
        let dictionary = InMemoryDictionary::new()
            .with_field("username", "user_name", "{}")
            .with_field("age", "age", "{}")
            .with_field("other", "other", "{}");
        let found = dictionary
            .find_by_names(&["user_name".to_string(), "age".to_string()])
            .expect("lookup");
        let names: Vec<_> = found.iter().map(|def| def.name.as_str()).collect();
        assert_eq!(names, vec!["username", "age"]);
    }

    #[test]
    fn get_by_id_returns_none_for_unknown() {
        let dictionary = InMemoryDictionary::new().with_dict(1, "colors", r#"["red"]"#);
        assert!(dictionary.get_by_id(2).expect("lookup").is_none());
        assert_eq!(dictionary.get_by_id(1).expect("lookup").map(|d| d.id), Some(1));
    }
}
