//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load key → Build ServiceHub → Start watcher/admin → Serve API
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Save vault → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
