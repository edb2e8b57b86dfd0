use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Network {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    pub location: Location,

    /// Path of the network's station feed, relative to the directory origin.
    #[serde(rename = "href")]
    pub detail_locator: String,
}

impl Network {
    pub fn city(&self) -> &str {
        &self.location.city
    }
}
