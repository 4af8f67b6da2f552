//! REST endpoints that live outside the GraphQL surface

pub mod health;
