//! Dining Table Model

use serde::{Deserialize, Deserializer, Serialize, de};

/// Dining table entity (unique number per restaurant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    pub number: i64,
    /// Generated QR image: media-relative path on the row, `/media/...` URL
    /// in responses
    pub qr_code: Option<String>,
}

/// Register table payload
///
/// `number` is optional on the wire so a missing value yields a
/// field-level validation error instead of a generic body rejection.
/// Form inputs post it as a string, so `"5"` is accepted as well as `5`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub number: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Int(i64),
    Text(String),
}

/// Blank strings count as missing
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberInput::Int(n)) => Ok(Some(n)),
        Some(NumberInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid table number: {text:?}")))
        }
    }
}
