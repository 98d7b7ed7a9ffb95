//! HTTP surface for the sharded cache engine: CLI config, error mapping,
//! metrics, OpenAPI document, routes, and application state wiring.
//! Split into a library so integration tests can build the router
//! directly instead of spawning the `kv-server` binary.

pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod state;
