use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, patch, routes, State};
use std::sync::Arc;

use crate::api::data_models::{ForceChargeCommand, ForceChargeUpdate};
use crate::api::error::ApiError;
use crate::state::AppState;

fn upstream_error(e: ApiError) -> Custom<String> {
    Custom(Status::BadGateway, e.to_string())
}

#[get("/force-charge")]
pub async fn get_force_charge(
    state: &State<Arc<AppState>>,
) -> Result<Json<ForceChargeCommand>, Custom<String>> {
    state
        .api_client
        .get_force_charge()
        .await
        .map(Json)
        .map_err(upstream_error)
}

#[patch("/force-charge", data = "<update>")]
pub async fn update_force_charge(
    update: Json<ForceChargeUpdate>,
    state: &State<Arc<AppState>>,
) -> Result<Json<ForceChargeCommand>, Custom<String>> {
    state
        .api_client
        .update_force_charge(update.forceCharge)
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_force_charge, update_force_charge]
}
