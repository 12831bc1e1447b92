//! # growth
//!
//! Star-growth forecasting for popular GitHub repositories.
//! Provides feature extraction, model selection, forecasts and trend insights.

pub use growth_facade::*;
