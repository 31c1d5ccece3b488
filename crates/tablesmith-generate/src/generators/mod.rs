use std::sync::OnceLock;

use chrono::NaiveDateTime;
use tablesmith_core::{Dictionary, Field, MockType};

use crate::errors::GenerationError;

mod dictionary;
mod random;
mod rule;
mod sequence;

pub use dictionary::DictGenerator;
pub use random::{RandomGenerator, RandomKind};
pub use rule::{RULE_MAX_REPEAT, RuleGenerator};
pub use sequence::{DefaultGenerator, FixedGenerator, IncreaseGenerator};

/// Inputs shared by every generator during one synthesis run.
pub struct GeneratorContext<'a> {
    pub dictionary: &'a dyn Dictionary,
    /// Wall-clock time the run started; stands in for `CURRENT_TIMESTAMP`.
    pub now: NaiveDateTime,
}

/// Produces one column of synthetic values.
///
/// Every call returns exactly `row_count` values and keeps no state between
/// calls.
pub trait MockGenerator: Send + Sync {
    fn mock_type(&self) -> MockType;

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError>;
}

/// Fixed set of generators, one per mock type.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    default: DefaultGenerator,
    fixed: FixedGenerator,
    increase: IncreaseGenerator,
    random: RandomGenerator,
    rule: RuleGenerator,
    dict: DictGenerator,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry; read-only once built.
    pub fn global() -> &'static GeneratorRegistry {
        static REGISTRY: OnceLock<GeneratorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(GeneratorRegistry::new)
    }

    /// Generator for a mock type; unset falls back to the default generator.
    pub fn resolve(&self, mock_type: Option<MockType>) -> &dyn MockGenerator {
        match mock_type {
            None | Some(MockType::None) => &self.default,
            Some(MockType::Fixed) => &self.fixed,
            Some(MockType::Increase) => &self.increase,
            Some(MockType::Random) => &self.random,
            Some(MockType::Rule) => &self.rule,
            Some(MockType::Dict) => &self.dict,
        }
    }

    pub fn generate(
        &self,
        field: &Field,
        row_count: usize,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        let values = self
            .resolve(field.mock_type)
            .generate(field, row_count, ctx, rng)?;
        if values.len() != row_count {
            return Err(GenerationError::GenerationData(format!(
                "generator for {} produced {} values, expected {row_count}",
                field.field_name,
                values.len()
            )));
        }
        Ok(values)
    }
}

/// Leading integer of `raw` the way a lenient `parseInt` reads it:
/// optional sign, then digits; trailing text is ignored.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Sequence start taken from mock params, defaulting to 1.
pub(crate) fn sequence_start(field: &Field) -> i64 {
    field
        .mock_params_trimmed()
        .and_then(parse_leading_int)
        .unwrap_or(1)
}
