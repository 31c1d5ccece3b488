use rand::Rng;
use rand_regex::Regex as RandRegex;
use tablesmith_core::{Field, MockType};

use super::{GeneratorContext, MockGenerator};
use crate::errors::GenerationError;

/// Upper bound for unbounded repetitions such as `*` and `+`.
pub const RULE_MAX_REPEAT: u32 = 32;

/// Random expansions of the regular expression held in the mock params.
#[derive(Debug, Default)]
pub struct RuleGenerator;

impl MockGenerator for RuleGenerator {
    fn mock_type(&self) -> MockType {
        MockType::Rule
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        let pattern = field.mock_params_trimmed().ok_or_else(|| {
            GenerationError::GenerationData(format!(
                "field {} requires a regex pattern",
                field.field_name
            ))
        })?;
        let regex = RandRegex::compile(pattern, RULE_MAX_REPEAT).map_err(|err| {
            GenerationError::GenerationData(format!(
                "invalid regex pattern for {}: {err}",
                field.field_name
            ))
        })?;
        Ok((0..row_count).map(|_| rng.sample(&regex)).collect())
    }
}
