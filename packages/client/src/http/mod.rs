//! HTTP request and response model
//!
//! Header accumulation, target resolution, the request spec and its frozen
//! form, and the response result with its decoding accessors.

pub mod content_type;
pub mod headers;
pub mod http_date;
pub mod request;
pub mod response;
pub mod url;

pub use content_type::*;
pub use headers::*;
pub use request::*;
pub use response::*;
pub use self::url::BaseUrl;
