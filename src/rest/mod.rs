//! Dashboard API endpoint catalogue.
//!
//! This module describes *what* the connector calls:
//!
//! - [`Endpoint`]: An HTTP method plus a path template with `{name}` placeholders
//! - [`endpoints`]: The constants for every Dashboard API operation in use
//!
//! # Example
//!
//! ```rust
//! use meraki_connector::rest::endpoints;
//!
//! let path = endpoints::LIST_DEVICE_CLIENTS
//!     .resolve(&[("serial", "Q2XX-AAAA-BBBB")])
//!     .unwrap();
//! assert_eq!(path, "/devices/Q2XX-AAAA-BBBB/clients");
//! ```

mod endpoint;
pub mod endpoints;

pub use endpoint::Endpoint;
