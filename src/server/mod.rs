//! Connection and concurrency core.
//!
//! # Data Flow
//! ```text
//! start()
//!     → Listener::bind (failure leaves the server in Created)
//!     → tasks.rs accept loop ──hand-off channel──▶ tasks.rs dispatch loop
//!                                                   → one task per connection (JoinSet)
//! stop()
//!     → Shutdown::trigger
//!     → accept loop exits, listener dropped, channel closed
//!     → dispatch loop drains the JoinSet
//!     → start() returns
//! ```
//!
//! # State Machine (state.rs)
//! ```text
//! Created → Listening → Draining → Stopped
//! Created → Stopped                (stop before start)
//! ```
//!
//! # Design Decisions
//! - Shutdown is checked at the accept boundary only
//! - Every connection that made it into the channel is served
//! - The inventory serializes itself; no extra locking here

pub mod shop_server;
pub mod state;
mod tasks;

pub use shop_server::{PawnShopServer, ServerError};
pub use state::ServerState;
