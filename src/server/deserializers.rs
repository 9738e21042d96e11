use serde::{Deserialize, Deserializer};

// query strings carry `page` as text, anything unparsable means "first page"
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse::<i64>().ok()))
}

// the web client sends numeric ids both as JSON numbers and as strings ("3"),
// so accept either and keep the raw text around for the empty-string check
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    pub fn is_empty(&self) -> bool {
        matches!(self, NumberOrString::String(value) if value.is_empty())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(value) => Some(*value),
            NumberOrString::String(value) => value.trim().parse().ok(),
        }
    }
}
