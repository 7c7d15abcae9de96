//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack, graceful shutdown)
//!     → request.rs (request ID, trace span, request metrics)
//!     → api.rs (purchase order handlers over the ServiceHub)
//!     → response.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod api;
pub mod request;
pub mod response;
pub mod server;

pub use api::{Peers, Proposal, PurchaseOrders, WhoAmI};
pub use request::X_REQUEST_ID;
pub use response::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer};
