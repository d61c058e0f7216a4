pub mod api;
pub mod card;
pub mod chart;
pub mod config;
pub mod era;
pub mod error;
pub mod points;
pub mod ratings;
pub mod stats;
pub mod value_range;
// cmd and reports belong to the binary (main.rs).
