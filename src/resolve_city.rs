use crate::{Error, Gateway, Network, RawStation};
use tracing::debug;

impl Gateway {
    pub async fn resolve_city(&self, city: &str) -> Result<Vec<Network>, Error> {
        let networks = self.list_networks().await?;
        Ok(filter_by_city(networks, city))
    }

    pub async fn stations_for_city(&self, city: &str) -> Result<Vec<RawStation>, Error> {
        let matches = self.resolve_city(city).await?;
        let network = match select_network(&matches) {
            Some(network) => network,
            None => return Err(Error::NotFound(city.to_string())),
        };

        debug!(
            city,
            matches = matches.len(),
            locator = %network.detail_locator,
            "resolved network"
        );
        self.fetch_stations(&network.detail_locator).await
    }
}

pub fn filter_by_city(networks: Vec<Network>, city: &str) -> Vec<Network> {
    let wanted = city.to_lowercase();
    networks
        .into_iter()
        .filter(|network| network.city().to_lowercase() == wanted)
        .collect()
}

/// Picks the network to fetch when a city has several: the first in directory order.
pub fn select_network(matches: &[Network]) -> Option<&Network> {
    matches.first()
}

pub fn city_names(networks: &[Network]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for network in networks {
        if !cities.iter().any(|c| c == network.city()) {
            cities.push(network.city().to_string());
        }
    }
    cities
}
