//! Server module for exposing a compiled schema over HTTP
//!
//! The [`ServerBuilder`] compiles registered fragments into a [`ServerHost`];
//! exposures then serve the host over a transport.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::GraphQLExposure;
pub use host::ServerHost;
