//! Domain layer - validation, merge logic, link resolution and port definitions

pub mod links;
pub mod merge;
pub mod models;
pub mod ports;
pub mod rules;
pub mod service;
