//! Authenticated HTTP client for the RoomLink dormitory-management API.
//!
//! Every call carries the current bearer token, returns the response payload
//! rather than the HTTP envelope, and recovers once from a 401 by refreshing
//! the token through the cookie-based refresh endpoint.

mod client;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod request_context;
pub mod routes;
pub mod telemetry;
pub mod token;
pub mod types;

pub use client::{ImageUpload, RoomLinkClient};
pub use config::{Config, ConfigLocation};
pub use errors::Error;
pub use request_context::{FormPart, RequestBody, RequestContext, RequestOptions};
pub use token::{StaticToken, TokenClaims, TokenHolder, TokenSource};
pub use types::{AuthSession, Credentials};

#[cfg(test)]
mod tests;
