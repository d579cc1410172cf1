//! Plain-text and chart-ready views of the solar charge state.
#![allow(non_snake_case)]

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use rocket::serde::Serialize;

use crate::api::data_models::{ChargeState, SolarChargeState, SpareCapacityPoint};
use crate::poller::Snapshot;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ChartPoint {
    pub minutesAgo: i64,
    pub kilowatts: f64,
}

pub fn charge_state_label(state: ChargeState) -> &'static str {
    match state {
        ChargeState::Stopped => "Not Charging",
        ChargeState::Charging => "Currently Charging",
        ChargeState::Disconnected => "Disconnected",
        ChargeState::Unknown => "Unknown",
    }
}

/// Accepts RFC 3339 as well as the backend's offset-less local time
/// (`2022-01-08T10:15:00`).
pub fn parse_last_updated(value: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M:%S"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

pub fn minutes_since_update(state: &SolarChargeState, now: DateTime<Local>) -> Option<i64> {
    let updated = parse_last_updated(&state.lastUpdated)?;
    Some(((now - updated).num_seconds() as f64 / 60.0).round() as i64)
}

pub fn spare_capacity_chart(history: &[SpareCapacityPoint], now: DateTime<Utc>) -> Vec<ChartPoint> {
    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    history
        .iter()
        .map(|point| ChartPoint {
            minutesAgo: ((now_secs - point.timestamp) / 60.0).round() as i64,
            kilowatts: (point.value / 100.0).round() / 10.0,
        })
        .collect()
}

fn kilowatts(watts: f64) -> String {
    format!("{:.2} kW", watts / 1000.0)
}

/// Single console line, as printed on every successful refresh.
pub fn status_line(state: &SolarChargeState) -> String {
    format!(
        "{:<19} | State: {:<12} | Load: {:>9} | Gen: {:>9} | Spare Cap.: {:>9} | Avg. Spare Cap.: {:>9} | Charge Rate: {} Amps | Vehicle: {:.0}% | Powerwall: {:.0}% |",
        state.lastUpdated,
        format!("{:?}", state.chargeState),
        kilowatts(state.currentLoad),
        kilowatts(state.currentGeneration),
        kilowatts(state.spareCapacity),
        kilowatts(state.average_spare_capacity()),
        state.chargeCurrentRequest,
        state.vehicleCharge,
        state.batteryCharge,
    )
}

/// Text dashboard. Shows a loading message until the first successful
/// refresh and keeps the last good state on screen when a refresh fails.
pub fn dashboard_text(snapshot: &Snapshot<SolarChargeState>, now: DateTime<Local>) -> String {
    let mut lines = Vec::new();

    match &snapshot.state {
        None => lines.push("Loading ...".to_string()),
        Some(state) => {
            match minutes_since_update(state, now) {
                Some(minutes) => lines.push(format!("Last update {} mins ago", minutes)),
                None => lines.push(format!("Last update {}", state.lastUpdated)),
            }
            lines.push(charge_state_label(state.chargeState).to_string());
            lines.push(format!("Load: {}", kilowatts(state.currentLoad)));
            lines.push(format!("Solar: {}", kilowatts(state.currentGeneration)));
            lines.push(format!("Spare: {}", kilowatts(state.spareCapacity)));
            lines.push(format!("Current: {} Amps", state.chargeCurrentRequest));
            lines.push(format!("Vehicle: {:.0} %", state.vehicleCharge));
            lines.push(format!("Battery: {:.0} %", state.batteryCharge));
        }
    }

    if let Some(error) = &snapshot.error {
        lines.push(format!("Error: {}", error.message));
    }

    lines.join("\n")
}
