//! Everything a typical chain needs, in one import.

pub use crate::builder::{
    AllowReceiving, HeadersReceiving, HttpMethodBuilder, LocationReceiving, ObjectReceiving,
    ResponseReceiving,
};
pub use restchain_client::prelude::*;
