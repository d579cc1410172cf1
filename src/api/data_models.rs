// api/data_models.rs
//
// Field names follow the camelCase spelling produced by `naming::keys_to_camel`,
// so these structs decode the converted payloads directly.
#![allow(non_snake_case)]

use rocket::serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "rocket::serde")]
pub enum ChargeState {
    Stopped,
    Charging,
    Disconnected,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SpareCapacityPoint {
    pub timestamp: f64, // epoch seconds
    pub value: f64,     // in watts
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SolarChargeState {
    pub lastUpdated: String,
    pub chargeState: ChargeState,
    pub currentLoad: f64,       // in watts
    pub currentGeneration: f64, // in watts
    pub spareCapacity: f64,     // in watts
    pub chargeCurrentRequest: f64, // in amps
    pub vehicleCharge: f64,     // percent
    pub batteryCharge: f64,     // percent
    #[serde(default)]
    pub spareCapacityHistory: Vec<SpareCapacityPoint>,
}

impl SolarChargeState {
    /// Moving average of the spare capacity history, 0 when there is none.
    pub fn average_spare_capacity(&self) -> f64 {
        if self.spareCapacityHistory.is_empty() {
            return 0.0;
        }
        let total: f64 = self.spareCapacityHistory.iter().map(|p| p.value).sum();
        total / self.spareCapacityHistory.len() as f64
    }
}

/// When a force charge was requested. The backend writes either a formatted
/// string or epoch seconds, and `null` while no force charge is active.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde", untagged)]
pub enum RequestTime {
    Text(String),
    Epoch(f64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ForceChargeCommand {
    #[serde(default)]
    pub requestTime: Option<RequestTime>,
    #[serde(default)]
    pub forceCharge: bool,
    #[serde(default = "default_min_vehicle_charge")]
    pub minVehicleCharge: i64, // percent
    #[serde(default = "default_force_charge_level")]
    pub forceChargeLevel: i64, // percent
    #[serde(default = "default_force_charge_amps")]
    pub forceChargeAmps: i64,
    #[serde(default = "default_min_spare_capacity")]
    pub minSpareCapacity: i64, // in watts
}

fn default_min_vehicle_charge() -> i64 {
    50
}

fn default_force_charge_level() -> i64 {
    70
}

fn default_force_charge_amps() -> i64 {
    5
}

fn default_min_spare_capacity() -> i64 {
    1250
}

impl ForceChargeCommand {
    /// A force charge runs while one was requested and the vehicle is still
    /// below the target level.
    pub fn is_forcing_charge(&self, vehicle_charge: f64) -> bool {
        self.requestTime.is_some() && vehicle_charge < self.forceChargeLevel as f64
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ForceChargeUpdate {
    pub forceCharge: bool,
}
