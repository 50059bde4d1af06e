//! Application services: use-case implementations.
//!
//! The hub owns devices and is passed by `&mut` reference to the services
//! that act on them, keeping the dependency explicit at every call site.

pub mod caretaker;
pub mod command_history;
pub mod hub;
pub mod interpreter;
