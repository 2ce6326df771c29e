//! # Sundash
//!
//! Dashboard for the monthly mean total sunspot number.
//!
//! - [`data`]: observation model, loader, year filter and chart transforms
//! - [`state`]: slider controls and the event-driven dashboard state
//! - [`config`]: startup configuration
//! - [`app`], [`ui`], [`color`]: the egui front end

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
