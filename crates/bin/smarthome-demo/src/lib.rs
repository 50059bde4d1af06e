//! # smarthome-demo
//!
//! Composition root for the scripted smart-home run.
//!
//! ## Responsibilities
//! - Load configuration (`smarthome.toml` plus environment overrides)
//! - Install the tracing subscriber
//! - Register the household, attach the console observer and run every
//!   section of the scenario
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

pub mod config;
pub mod logging;
pub mod scenario;
