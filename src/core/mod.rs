//! Core XTM client module

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod params;
pub mod transport;
