#![allow(non_snake_case)]

use chrono::{DateTime, Local, Utc};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{get, routes, State};
use std::sync::Arc;

use crate::api::data_models::SolarChargeState;
use crate::api::error::ErrorInfo;
use crate::render::{self, ChartPoint};
use crate::state::AppState;

#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct DashboardView {
    pub currentState: Option<SolarChargeState>,
    pub currentError: Option<ErrorInfo>,
    pub lastSuccess: Option<DateTime<Utc>>,
    pub lastFailure: Option<DateTime<Utc>>,
    pub spareCapacityChart: Vec<ChartPoint>,
}

#[get("/dashboard/state")]
pub async fn get_state(state: &State<Arc<AppState>>) -> Json<DashboardView> {
    let snapshot = state.solar_charge_state.snapshot().await;
    let chart = snapshot
        .state
        .as_ref()
        .map(|s| render::spare_capacity_chart(&s.spareCapacityHistory, Utc::now()))
        .unwrap_or_default();

    Json(DashboardView {
        currentState: snapshot.state,
        currentError: snapshot.error,
        lastSuccess: snapshot.last_success,
        lastFailure: snapshot.last_failure,
        spareCapacityChart: chart,
    })
}

#[get("/dashboard")]
pub async fn get_dashboard(state: &State<Arc<AppState>>) -> String {
    let snapshot = state.solar_charge_state.snapshot().await;
    render::dashboard_text(&snapshot, Local::now())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_state, get_dashboard]
}
