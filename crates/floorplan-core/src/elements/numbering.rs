//! Lenient table-number parsing.
//!
//! Stored layouts carry table numbers either as JSON numbers or as numeric
//! strings; both load into `u32`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u32),
    Text(String),
}

impl NumberOrText {
    fn into_number<E: serde::de::Error>(self) -> Result<u32, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid table number: {text:?}"))),
        }
    }
}

pub(super) fn deserialize_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?.into_number()
}

pub(super) fn deserialize_numbers<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<NumberOrText>::deserialize(deserializer)?
        .into_iter()
        .map(NumberOrText::into_number)
        .collect()
}
