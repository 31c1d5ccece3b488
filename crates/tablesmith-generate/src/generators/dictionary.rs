use rand::Rng;
use tablesmith_core::{Field, MockType};

use super::{GeneratorContext, MockGenerator};
use crate::errors::GenerationError;

/// Samples uniformly from a stored word list; mock params hold the dictionary id.
#[derive(Debug, Default)]
pub struct DictGenerator;

impl MockGenerator for DictGenerator {
    fn mock_type(&self) -> MockType {
        MockType::Dict
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        let raw_id = field.mock_params_trimmed().ok_or_else(|| {
            GenerationError::GenerationData(format!(
                "field {} requires a dictionary id",
                field.field_name
            ))
        })?;
        let id = raw_id.parse::<u64>().map_err(|_| {
            GenerationError::GenerationData(format!(
                "field {}: dictionary id '{raw_id}' is not numeric",
                field.field_name
            ))
        })?;
        let entry = ctx.dictionary.get_by_id(id)?.ok_or_else(|| {
            GenerationError::GenerationData(format!("dictionary {id} not found"))
        })?;

        let words: Vec<String> = serde_json::from_str(&entry.content).map_err(|err| {
            GenerationError::GenerationData(format!(
                "dictionary {id} content is not a list of strings: {err}"
            ))
        })?;
        if words.is_empty() {
            return Err(GenerationError::GenerationData(format!(
                "dictionary {id} is empty"
            )));
        }

        Ok((0..row_count)
            .map(|_| words[rng.random_range(0..words.len())].clone())
            .collect())
    }
}
