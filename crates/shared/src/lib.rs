pub mod abstract_trait;
pub mod config;
pub mod domain;
pub mod errors;
pub mod model;
pub mod repository;
pub mod service;
pub mod utils;

/// In-memory repositories for exercising services and routes without Postgres.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
