//! Car registry service library.
//!
//! An HTTP API over two document collections, users and cars, where a user
//! holds an ordered list of car references.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod store;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{DocumentStore, MemoryStore};
