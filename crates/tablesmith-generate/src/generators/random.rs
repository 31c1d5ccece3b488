use chrono::DateTime;
use fake::Fake;
use rand::Rng;
use tablesmith_core::{Field, MockType};

use super::{GeneratorContext, MockGenerator};
use crate::errors::GenerationError;

/// 2022-01-01T00:00:00Z; random dates fall within that year.
const DATE_WINDOW_START: i64 = 1_640_995_200;
const DATE_WINDOW_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Semantic subtype selected by a random field's mock params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RandomKind {
    String,
    Name,
    City,
    Url,
    Email,
    Ip,
    Integer,
    Decimal,
    University,
    Date,
    Timestamp,
    Phone,
    Number,
}

impl RandomKind {
    pub const ALL: &'static [RandomKind] = &[
        RandomKind::String,
        RandomKind::Name,
        RandomKind::City,
        RandomKind::Url,
        RandomKind::Email,
        RandomKind::Ip,
        RandomKind::Integer,
        RandomKind::Decimal,
        RandomKind::University,
        RandomKind::Date,
        RandomKind::Timestamp,
        RandomKind::Phone,
        RandomKind::Number,
    ];

    /// Accepts the English names and the Chinese UI labels.
    pub fn parse(label: &str) -> Option<Self> {
        let kind = match label.trim().to_lowercase().as_str() {
            "string" | "字符串" => RandomKind::String,
            "name" | "人名" => RandomKind::Name,
            "city" | "城市" => RandomKind::City,
            "url" | "网址" => RandomKind::Url,
            "email" | "邮箱" => RandomKind::Email,
            "ip" => RandomKind::Ip,
            "integer" | "整数" => RandomKind::Integer,
            "decimal" | "小数" => RandomKind::Decimal,
            "university" | "大学" => RandomKind::University,
            "date" | "日期" => RandomKind::Date,
            "timestamp" | "时间戳" => RandomKind::Timestamp,
            "phone" | "手机号" => RandomKind::Phone,
            "number" | "数字" => RandomKind::Number,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RandomKind::String => "string",
            RandomKind::Name => "name",
            RandomKind::City => "city",
            RandomKind::Url => "url",
            RandomKind::Email => "email",
            RandomKind::Ip => "ip",
            RandomKind::Integer => "integer",
            RandomKind::Decimal => "decimal",
            RandomKind::University => "university",
            RandomKind::Date => "date",
            RandomKind::Timestamp => "timestamp",
            RandomKind::Phone => "phone",
            RandomKind::Number => "number",
        }
    }

    /// Draw one value of this kind.
    pub fn sample(self, rng: &mut dyn rand::RngCore) -> String {
        match self {
            RandomKind::String => fake::faker::lorem::en::Word().fake_with_rng(rng),
            RandomKind::Name => fake::faker::name::en::Name().fake_with_rng(rng),
            RandomKind::City => fake::faker::address::en::CityName().fake_with_rng(rng),
            RandomKind::Url => {
                let word: String = fake::faker::lorem::en::Word().fake_with_rng(rng);
                let suffix: String = fake::faker::internet::en::DomainSuffix().fake_with_rng(rng);
                format!("https://www.{}.{suffix}", word.to_lowercase())
            }
            RandomKind::Email => fake::faker::internet::en::SafeEmail().fake_with_rng(rng),
            RandomKind::Ip => fake::faker::internet::en::IPv4().fake_with_rng(rng),
            RandomKind::Integer | RandomKind::Number => {
                rng.random_range(0..=i64::from(i32::MAX)).to_string()
            }
            RandomKind::Decimal => format!("{:.2}", rng.random_range(0.0..100_000.0_f64)),
            RandomKind::University => {
                let city: String = fake::faker::address::en::CityName().fake_with_rng(rng);
                format!("{city} University")
            }
            RandomKind::Date => {
                let seconds = DATE_WINDOW_START + rng.random_range(0..DATE_WINDOW_SECONDS);
                DateTime::from_timestamp(seconds, 0)
                    .map(|value| value.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default()
            }
            RandomKind::Timestamp => {
                let seconds = DATE_WINDOW_START + rng.random_range(0..DATE_WINDOW_SECONDS);
                (seconds * 1000 + rng.random_range(0..1000)).to_string()
            }
            RandomKind::Phone => fake::faker::phone_number::en::CellNumber().fake_with_rng(rng),
        }
    }
}

/// Independent draws of the subtype named by the mock params; unknown or
/// missing subtypes draw plain words.
#[derive(Debug, Default)]
pub struct RandomGenerator;

impl MockGenerator for RandomGenerator {
    fn mock_type(&self) -> MockType {
        MockType::Random
    }

    fn generate(
        &self,
        field: &Field,
        row_count: usize,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<String>, GenerationError> {
        let kind = field
            .mock_params_trimmed()
            .and_then(RandomKind::parse)
            .unwrap_or(RandomKind::String);
        Ok((0..row_count).map(|_| kind.sample(rng)).collect())
    }
}
