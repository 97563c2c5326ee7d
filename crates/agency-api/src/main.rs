use agency_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, state, routes)
    let (_state, router) = agency_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    agency_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
