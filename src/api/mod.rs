pub mod client;
pub mod data_models;
pub mod error;
