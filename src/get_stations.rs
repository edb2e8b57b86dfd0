use crate::{Error, Gateway, RawStation};
use serde::Deserialize;

impl Gateway {
    pub async fn fetch_stations(&self, detail_locator: &str) -> Result<Vec<RawStation>, Error> {
        #[derive(Deserialize)]
        struct NetworkDetail {
            stations: Vec<RawStation>,
        }

        #[derive(Deserialize)]
        struct Response {
            network: NetworkDetail,
        }

        //https://api.citybik.es/v2/networks/velib

        let url = self.url(detail_locator);
        let res: Response = self.get(&url).await?;
        Ok(res.network.stations)
    }
}
