//! Purchase Order Node Library
//!
//! A single ledger node exposing a small HTTP API for purchase orders:
//! who the node is, who its peers are, which purchase orders its vault holds,
//! and a proposal builder for a new purchase order with a named counterparty.

// Core subsystems
pub mod config;
pub mod contract;
pub mod http;
pub mod ledger;
pub mod net;

// Cross-cutting concerns
pub mod admin;
pub mod lifecycle;
pub mod observability;

pub use config::schema::NodeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
