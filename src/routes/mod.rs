pub mod dashboard;
pub mod force_charge;
