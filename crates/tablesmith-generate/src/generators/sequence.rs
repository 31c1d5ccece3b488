use tablesmith_core::{Field, MockType};

use super::{GeneratorContext, MockGenerator, sequence_start};
use crate::errors::GenerationError;

const DEFAULT_FIXED_VALUE: &str = "6";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Used when a field has no explicit mock strategy.
///
/// Primary keys count up from the mock params start; other fields repeat
/// their column default, or stay empty without one.
#[derive(Debug, Default)]
pub struct DefaultGenerator;

impl MockGenerator for DefaultGenerator {
    fn mock_type(&self) -> MockType {
        MockType::None
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        ctx: &GeneratorContext<'_>,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        if field.primary_key {
            return Ok(counting_from(sequence_start(field), row_count));
        }

        let value = match field.default_value.as_deref() {
            Some(default) if is_current_timestamp(default) => {
                ctx.now.format(TIMESTAMP_FORMAT).to_string()
            }
            Some(default) if !default.trim().is_empty() => default.to_string(),
            _ => String::new(),
        };
        Ok(vec![value; row_count])
    }
}

/// Repeats the mock params, `"6"` when blank.
#[derive(Debug, Default)]
pub struct FixedGenerator;

impl MockGenerator for FixedGenerator {
    fn mock_type(&self) -> MockType {
        MockType::Fixed
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        _ctx: &GeneratorContext<'_>,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        let value = field.mock_params_trimmed().unwrap_or(DEFAULT_FIXED_VALUE);
        Ok(vec![value.to_string(); row_count])
    }
}

/// `start, start + 1, ...` with `start` parsed from the mock params.
#[derive(Debug, Default)]
pub struct IncreaseGenerator;

impl MockGenerator for IncreaseGenerator {
    fn mock_type(&self) -> MockType {
        MockType::Increase
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        _ctx: &GeneratorContext<'_>,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        Ok(counting_from(sequence_start(field), row_count))
    }
}

fn counting_from(start: i64, row_count: usize) -> Vec<String> {
    (0..row_count)
        .map(|offset| (i128::from(start) + offset as i128).to_string())
        .collect()
}

fn is_current_timestamp(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("current_timestamp")
        || value.eq_ignore_ascii_case("current_timestamp()")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tablesmith_core::InMemoryDictionary;

    fn run(generator: &dyn MockGenerator, field: &Field, rows: usize) -> Vec<String> {
        let dictionary = InMemoryDictionary::new();
        let now = NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|date| date.and_hms_opt(7, 8, 9))
            .expect("valid timestamp");
        let ctx = GeneratorContext {
            dictionary: &dictionary,
            now,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        generator.generate(field, rows, &ctx, &mut rng).expect("generate")
    }

    #[test]
    fn increase_counts_from_params() {
        let field = Field::new("n", "int").with_mock(MockType::Increase, Some("5"));
        assert_eq!(run(&IncreaseGenerator, &field, 4), vec!["5", "6", "7", "8"]);
    }

    #[test]
    fn increase_defaults_to_one() {
        let field = Field::new("n", "int").with_mock(MockType::Increase, Some("abc"));
        assert_eq!(run(&IncreaseGenerator, &field, 3), vec!["1", "2", "3"]);
        let field = Field::new("n", "int").with_mock(MockType::Increase, None);
        assert_eq!(run(&IncreaseGenerator, &field, 2), vec!["1", "2"]);
    }

    #[test]
    fn fixed_repeats_params_or_six() {
        let field = Field::new("n", "int").with_mock(MockType::Fixed, Some("6"));
        assert_eq!(run(&FixedGenerator, &field, 3), vec!["6", "6", "6"]);
        let field = Field::new("n", "int").with_mock(MockType::Fixed, Some("  "));
        assert_eq!(run(&FixedGenerator, &field, 2), vec!["6", "6"]);
        let field = Field::new("s", "text").with_mock(MockType::Fixed, Some("hello"));
        assert_eq!(run(&FixedGenerator, &field, 2), vec!["hello", "hello"]);
    }

    #[test]
    fn default_primary_key_strictly_increases() {
        let mut field = Field::new("id", "bigint");
        field.primary_key = true;
        field.mock_params = Some("10".to_string());
        let values = run(&DefaultGenerator, &field, 5);
        assert_eq!(values, vec!["10", "11", "12", "13", "14"]);

        field.mock_params = None;
        assert_eq!(run(&DefaultGenerator, &field, 3), vec!["1", "2", "3"]);
    }

    #[test]
    fn default_repeats_column_default() {
        let mut field = Field::new("status", "int");
        field.default_value = Some("0".to_string());
        assert_eq!(run(&DefaultGenerator, &field, 2), vec!["0", "0"]);

        field.default_value = None;
        assert_eq!(run(&DefaultGenerator, &field, 2), vec!["", ""]);
    }

    #[test]
    fn default_renders_current_timestamp() {
        let mut field = Field::new("created_at", "datetime");
        field.default_value = Some("CURRENT_TIMESTAMP".to_string());
        assert_eq!(
            run(&DefaultGenerator, &field, 2),
            vec!["2024-05-06 07:08:09", "2024-05-06 07:08:09"]
        );
    }
}
