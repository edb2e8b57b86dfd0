mod get_stations;
mod list_networks;
mod resolve_city;
pub use resolve_city::{city_names, filter_by_city, select_network};
mod network;
pub use network::{Location, Network};
mod station;
pub use station::RawStation;
mod station_row;
pub use station_row::{build_rows, Ebikes, StationRow, NO_CARD_PAYMENT, NO_EBIKES};
mod figure;
pub use figure::{MapFigure, MapStyle};
mod config;
pub use config::Config;
pub mod dashboard;
mod error;
pub use error::Error;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const BASE_URL: &str = "https://api.citybik.es";

pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
}

impl Gateway {
    pub async fn new(base_url: &str, timeout: Option<Duration>) -> Result<Gateway, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "Accept",
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let timeout = match timeout {
            Some(t) => t,
            None => Duration::new(60, 0),
        };

        let client = match reqwest::ClientBuilder::new()
            .default_headers(headers)
            .https_only(base_url.starts_with("https://"))
            .timeout(timeout)
            .build()
        {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::Unspecified(format!(
                    "Could not create reqwest client ({}).",
                    err
                )))
            }
        };

        let c = Gateway {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        Ok(c)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        debug!(url, "GET");

        let res = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::NetworkError(format!(
                    "Could not send request to \"{}\" ({}).",
                    url, err
                )))
            }
        };

        let status = res.status().as_u16();
        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => {
                return Err(Error::NetworkError(format!(
                    "Could not read response body from \"{}\" ({}).",
                    url, err
                )))
            }
        };

        if !(200..=299).contains(&status) {
            return Err(Error::ApiError(status, text));
        }

        match serde_json::from_str(&text) {
            Ok(body) => Ok(body),
            Err(err) => Err(Error::SerializationError(format!(
                "Could not deserialize response from \"{}\" ({}).",
                url, err
            ))),
        }
    }
}
