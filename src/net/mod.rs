//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → [server accept task hands it to the dispatch task]
//!     → connection.rs (read one request, route, write one reply, close)
//! ```
//!
//! # Design Decisions
//! - One request per connection, then the server closes it
//! - Every connection runs in its own task, tagged with a connection id
//! - Per-connection failures never leave the connection's task

pub mod connection;
pub mod listener;

pub use connection::{serve_connection, ConnectionError, ConnectionId};
pub use listener::{Listener, ListenerError};
