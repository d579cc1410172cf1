use crate::api::client::ApiClient;
use crate::api::data_models::SolarChargeState;
use crate::api::error::ApiError;
use crate::poller::{PolledResource, Poller};
use crate::render;
use rocket::log::private::info;
use rocket::tokio::sync::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub api_client: Arc<ApiClient>,
    pub solar_charge_state: PolledResource<SolarChargeState>,
    pub poller: Mutex<Option<Poller<SolarChargeState>>>, // Track the active poller
    pub poll_interval: Duration,
}

impl AppState {
    pub fn new(api_client: ApiClient, poll_interval: Duration) -> Self {
        AppState {
            api_client: Arc::new(api_client),
            solar_charge_state: PolledResource::new(),
            poller: Mutex::new(None),
            poll_interval,
        }
    }

    /// Start refreshing the solar charge state, replacing any running poller
    pub async fn start_polling(&self) {
        self.stop_polling().await;

        info!(target: "app", "Polling {}/solar_charge_state", self.api_client.base_url());
        let client = self.api_client.clone();
        let poller = Poller::spawn(
            self.solar_charge_state.clone(),
            self.poll_interval,
            move || {
                let client = client.clone();
                async move {
                    let state = client.get_solar_charge_state().await?;
                    info!(target: "app", "{}", render::status_line(&state));
                    Ok::<_, ApiError>(state)
                }
            },
        )
        .await;

        *self.poller.lock().await = Some(poller);
    }

    /// Stop the active poller if it exists
    pub async fn stop_polling(&self) {
        if let Some(poller) = self.poller.lock().await.take() {
            poller.stop().await;
        }
    }

    pub async fn is_polling(&self) -> bool {
        self.poller.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a local address that was free a moment ago, so connecting is refused
    fn unused_base_url() -> String {
        let port = std::net::TcpListener::bind(("127.0.0.1", 0))
            .and_then(|listener| listener.local_addr())
            .expect("free port")
            .port();
        format!("http://127.0.0.1:{}/api/v1", port)
    }

    #[tokio::test]
    async fn test_start_and_stop_polling() {
        let state = AppState::new(
            ApiClient::new(unused_base_url()),
            Duration::from_secs(5),
        );
        assert!(!state.is_polling().await);

        state.start_polling().await;
        assert!(state.is_polling().await);

        // restarting replaces the poller instead of adding a second one
        state.start_polling().await;
        assert!(state.is_polling().await);

        state.stop_polling().await;
        assert!(!state.is_polling().await);
    }
}
