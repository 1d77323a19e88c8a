//! sos-types: domain records, validation rules, and storage ports for the
//! order-intake service.

pub mod domain;
pub mod ports;
