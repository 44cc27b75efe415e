//! Outbound REST helpers shared by the exchange clients

pub mod client;
pub mod signing;

pub use client::{RestClient, RestError};
pub use signing::{timestamp_ms, RequestSigner};
