/// API layer: request payloads and the HTTP client.
pub mod client;
pub mod errors;
pub mod request;
#[cfg(test)]
pub(crate) mod stand_in;

pub use client::ApiClient;
pub use errors::TransportFailure;
pub use request::{RecencyFilter, RequestConfig, build};
