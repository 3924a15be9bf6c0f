//! Adapters for the domain ports.

pub mod database;
pub mod email;
