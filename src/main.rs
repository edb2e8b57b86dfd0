use bikemap::dashboard::{router, Dashboard, Layout};
use bikemap::{city_names, Config, Error, Gateway, MapStyle};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "bikemap stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let gateway = Gateway::new(&config.api_url, Some(config.timeout)).await?;

    // The dropdown options are read once and never refreshed.
    let networks = gateway.list_networks().await?;
    let cities = city_names(&networks);
    info!(
        networks = networks.len(),
        cities = cities.len(),
        "loaded network directory"
    );

    let layout = Layout::new(cities, &config);
    let style = MapStyle::from_token(config.map_token.clone());
    let dashboard = Arc::new(Dashboard::new(gateway, layout, style));

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            return Err(Error::NetworkError(format!(
                "Could not bind {} ({}).",
                config.listen_addr, err
            )))
        }
    };
    info!("dashboard listening on http://{}", config.listen_addr);

    match axum::serve(listener, router(dashboard)).await {
        Ok(()) => Ok(()),
        Err(err) => Err(Error::NetworkError(format!("Server failed ({}).", err))),
    }
}
