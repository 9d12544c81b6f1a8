//! Bike-share usage dashboard: loads the daily and hourly tables, trims IQR
//! outliers, and filters them by date range and season for the UI.

pub mod config;
pub mod data;
pub mod state;
