//! sos-hex: hexagonal order-intake library (core service + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use sos_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
