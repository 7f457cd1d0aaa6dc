//! Core abstractions shared by the widget, providers and CLI

pub mod config;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use config::AppConfig;
pub use rate::{CurrencyPair, RateProvider};
