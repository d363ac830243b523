//! Cycle, symptom and statistics service for the HerHealth tracker.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod sample;
pub mod stats;
pub mod store;
