//! # smarthome-domain
//!
//! Pure domain model for the smarthome device-state core.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (named appliances whose kind bounds their states)
//! - Define **State changes** (the structured record observers receive)
//! - Define **Snapshots** (saved device states)
//! - Define **Alerts** (events escalated through the handler chain)
//! - Define **Strategies** (policies deciding a target state)
//! - Define **Services** and **Hub events** (what the hub can be asked to do)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Capabilities that produce side effects are traits in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod alert;
pub mod change;
pub mod device;
pub mod event;
pub mod service;
pub mod snapshot;
pub mod strategy;
