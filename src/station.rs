use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawStation {
    pub name: String,

    #[serde(deserialize_with = "null_as_zero")]
    pub empty_slots: i64,

    #[serde(deserialize_with = "null_as_zero")]
    pub free_bikes: i64,

    pub latitude: f64,

    pub longitude: f64,

    pub timestamp: String,

    #[serde(default)]
    pub extra: Option<Map<String, Value>>,
}

// Some feeds publish `null` counts for stations that are offline.
fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}
