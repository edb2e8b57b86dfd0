use crate::{Error, Gateway, Network};
use serde::Deserialize;

impl Gateway {
    pub async fn list_networks(&self) -> Result<Vec<Network>, Error> {
        #[derive(Deserialize)]
        struct Response {
            networks: Vec<Network>,
        }

        //https://api.citybik.es/v2/networks

        let url = self.url("/v2/networks");
        let res: Response = self.get(&url).await?;
        Ok(res.networks)
    }
}
