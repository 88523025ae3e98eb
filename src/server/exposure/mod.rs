//! API exposure layers
//!
//! Exposures translate a transport protocol into calls on the
//! transport-agnostic [`ServerHost`](crate::server::host::ServerHost).

pub mod graphql;

pub use graphql::GraphQLExposure;
