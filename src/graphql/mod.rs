//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! This is the single API surface for the Places backend.
//!
//! Domain failures (invalid credentials, duplicate review, missing session)
//! are returned as values inside each operation's result object, never as
//! transport-level errors. Clients discriminate by inspecting the payload
//! shape. Only unexpected failures (database, network) surface as GraphQL
//! errors.

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
mod subscriptions;
pub mod types;

pub use auth::{AuthUser, verify_token};
pub use schema::{PlacesSchema, build_schema};
