//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     stop() → Shutdown::trigger → accept loop exits → listener dropped
//!         → dispatch drains in-flight handlers → start() returns
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop()
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accept, drain, return
//! - The shutdown flag is level-triggered, so late subscribers still see it
//! - In-flight handlers never observe the signal

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
