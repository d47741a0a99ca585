//! Fluent builder stages
//!
//! Entry point, verb builders, header and body stages and the response stage.

pub mod auth;
pub mod body;
pub mod core;
pub mod entry;
pub mod headers;
pub mod methods;
pub mod response;

pub use self::core::*;
pub use entry::*;
pub use headers::*;
pub use methods::*;
pub use response::*;
