use solar_dashboard::api::client::ApiClient;
use solar_dashboard::config::Config;
use solar_dashboard::state::AppState;
use std::sync::Arc;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(&config_path)?.with_host(std::env::var("APP_HOST").ok());

    let app_state = AppState::new(
        ApiClient::from_config(&config.api),
        config.dashboard.poll_interval(),
    );

    solar_dashboard::build(Arc::new(app_state)).launch().await?;

    Ok(())
}
