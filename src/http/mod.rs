//! Backend HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! get(path) / post(path, body)
//!     → BackendLocator::resolve (memoized base URL)
//!     → client.rs (normalize path, encode body, send)
//!     → 2xx: decode JSON into the caller's type
//!     → non-2xx: error_body.rs (message field or raw text)
//!     → error.rs (ClientError returned to the caller)
//! ```

pub mod client;
pub mod error;
pub mod error_body;

pub use client::{build_http_client, TransporterClient};
pub use error::{ClientError, ClientResult};
pub use error_body::ErrorBody;
