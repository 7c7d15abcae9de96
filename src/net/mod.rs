//! Network layer subsystem.
//!
//! The API listener is a plain tokio `TcpListener`; when `[listener.tls]` is
//! configured the same socket is served through rustls (tls.rs).

pub mod tls;
