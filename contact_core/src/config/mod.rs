//! Layered configuration for the contact client

pub mod settings;

pub use settings::*;
