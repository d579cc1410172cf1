// api/client.rs
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use rocket::log::private::debug;
use rocket::serde::de::DeserializeOwned;
use rocket::serde::json::{serde_json, Value};

use crate::api::data_models::{ForceChargeCommand, ForceChargeUpdate, SolarChargeState};
use crate::api::error::ApiError;
use crate::config::ApiConfig;
use crate::naming::{keys_to_camel, keys_to_snake};

/// Outbound request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured data: keys are converted to snake_case before sending.
    Json(Value),
    /// Anything else, sent as-is with its own content type.
    Raw { content_type: String, bytes: Vec<u8> },
}

pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        ApiClient::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the response body with camelCase keys.
    /// An empty body comes back as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(target: "app", "{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        builder = match body {
            Some(RequestBody::Json(data)) => builder.json(&keys_to_snake(&data)),
            Some(RequestBody::Raw {
                content_type,
                bytes,
            }) => builder.header(CONTENT_TYPE, content_type).body(bytes),
            None => builder,
        };

        let res = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !res.status().is_success() {
            return Err(ApiError::Status {
                url,
                status: res.status().as_u16(),
            });
        }

        let bytes = res.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        let raw: Value =
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })?;
        Ok(keys_to_camel(&raw))
    }

    async fn request_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<T, ApiError> {
        let value = self.request(method, path, body).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            url: self.url(path),
            source,
        })
    }

    pub async fn get_solar_charge_state(&self) -> Result<SolarChargeState, ApiError> {
        self.request_typed(Method::GET, "solar_charge_state", None)
            .await
    }

    pub async fn get_force_charge(&self) -> Result<ForceChargeCommand, ApiError> {
        self.request_typed(Method::GET, "force_charge", None).await
    }

    pub async fn update_force_charge(
        &self,
        force_charge: bool,
    ) -> Result<ForceChargeCommand, ApiError> {
        let update = ForceChargeUpdate {
            forceCharge: force_charge,
        };
        let body = serde_json::to_value(&update).map_err(|source| ApiError::Decode {
            url: self.url("force_charge"),
            source,
        })?;
        self.request_typed(Method::PATCH, "force_charge", Some(RequestBody::Json(body)))
            .await
    }
}
