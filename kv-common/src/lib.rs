//! # kv-common
//!
//! Shared wire contracts, TTL parsing, and the error taxonomy used by both
//! the HTTP server and the client library. Nothing here talks to the cache
//! engine or to storage; this crate only describes the shape of the API.

pub mod contracts;
pub mod error;
pub mod ttl;

pub use error::ApiError;
