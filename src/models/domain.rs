use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A part stored in a shelf basket.
///
/// Decoding is lenient: a document with a missing or malformed field still
/// decodes, with that field falling back to empty text, zero or shelf `A`,
/// so one bad value never hides a part from search. Only `$id` is required.
/// Records created through the service are always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename(serialize = "id", deserialize = "$id"), alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(rename = "shelfType", default, deserialize_with = "lenient_shelf_type")]
    pub shelf_type: ShelfType,
    #[serde(
        rename = "registeredAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub registered_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record {
    /// Brand text, or "" when the record has none
    pub fn brand_or_empty(&self) -> &str {
        self.brand.as_deref().unwrap_or("")
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.quantity)
    }
}

/// Scalars as their text form; null, arrays and objects as nothing
fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

/// Whole non-negative counts, from numbers or numeric text. Anything else is 0.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match count {
        Some(count) if count.is_finite() && count > 0.0 => count.min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

fn lenient_shelf_type<'de, D>(deserializer: D) -> Result<ShelfType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if text.trim().eq_ignore_ascii_case("b") => ShelfType::B,
        _ => ShelfType::A,
    })
}

fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => chrono::DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|at| at.with_timezone(&chrono::Utc)),
        _ => None,
    })
}

/// Shelf a basket belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelfType {
    #[default]
    A,
    B,
}

impl ShelfType {
    /// Number of baskets the shelf holds
    pub fn basket_count(self) -> u8 {
        match self {
            ShelfType::A => 22,
            ShelfType::B => 14,
        }
    }
}

/// Coarse stock indicator shown next to a part's quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    High,
    Medium,
    Low,
}

impl StockLevel {
    pub fn from_quantity(quantity: u32) -> Self {
        if quantity >= 15 {
            StockLevel::High
        } else if quantity >= 8 {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }
}

/// Fields of a record before the store assigns it an id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub quantity: u32,
    pub location: String,
    #[serde(rename = "shelfType")]
    pub shelf_type: ShelfType,
    #[serde(rename = "registeredAt")]
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl NewRecord {
    pub fn into_record(self, id: String) -> Record {
        Record {
            id,
            name: self.name,
            brand: self.brand,
            quantity: self.quantity,
            location: self.location,
            shelf_type: self.shelf_type,
            registered_at: Some(self.registered_at),
        }
    }
}

/// A record with the score it earned against one search query.
///
/// Produced per search call and dropped once the response is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: Record,
    pub score: f64,
}

impl ScoredRecord {
    /// Score as a whole percentage for display. Substring hits can exceed 100.
    pub fn match_percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}
