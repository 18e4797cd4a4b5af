//! REST invocation layer for the Dashboard API.
//!
//! This module turns an [`Endpoint`](crate::rest::Endpoint) plus parameters
//! into a classified [`Outcome`].
//!
//! # Overview
//!
//! - [`Transport`]: The HTTP seam; [`ReqwestTransport`] in production
//! - [`HttpRequest`] / [`RawResponse`]: What goes over the wire
//! - [`classify`]: Maps a raw response to success payload or [`CallError`]
//! - [`CallExecutor`]: Authentication, URL construction and 429 retries
//! - [`CallExecutor::paginate`]: `perPage` / `startingAfter` pagination
//! - [`constants`]: Fixed protocol values
//!
//! # Example
//!
//! ```rust,ignore
//! use meraki_connector::clients::CallExecutor;
//! use meraki_connector::rest::endpoints;
//! use meraki_connector::ConnectorConfig;
//!
//! let config = ConnectorConfig::from_asset_json(&asset)?;
//! let executor = CallExecutor::new(&config)?;
//!
//! let organizations = executor
//!     .paginate(&endpoints::LIST_ORGANIZATIONS, &[], None, Vec::new())
//!     .await?;
//! ```

mod classify;
pub mod constants;
mod errors;
mod executor;
mod http_request;
mod http_response;
mod paginator;
mod transport;

pub use classify::{classify, Outcome};
pub use errors::{CallError, InvalidHttpRequestError, TransportError};
pub use executor::{CallExecutor, RetryPolicy};
pub use http_request::{
    set_query_param, HeaderSet, HttpMethod, HttpRequest, HttpRequestBuilder, QueryParams,
};
pub use http_response::{ApiResponse, PaginationInfo, RawResponse};
pub use paginator::page_size;
pub use transport::{ReqwestTransport, Transport};
