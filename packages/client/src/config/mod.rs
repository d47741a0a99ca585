//! Entry point configuration
//!
//! Where configuration files live and how they are read is up to the caller;
//! this module only describes the settings and checks them.

pub mod client;
pub mod validation;

pub use client::ClientConfig;
pub use validation::{ConfigResult, ConfigurationError, Validator};
