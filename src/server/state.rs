//! Server lifecycle states.

use std::fmt;

/// Where a [`PawnShopServer`](super::PawnShopServer) is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerState {
    /// Built, not yet bound.
    Created,
    /// Bound and accepting connections.
    Listening,
    /// No longer accepting; finishing in-flight connections.
    Draining,
    /// Every accepted connection has been answered.
    Stopped,
}

impl ServerState {
    /// State after a stop request. Stopping is idempotent.
    pub fn on_stop(self) -> Self {
        match self {
            ServerState::Created => ServerState::Stopped,
            ServerState::Listening => ServerState::Draining,
            other => other,
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Created => "created",
            ServerState::Listening => "listening",
            ServerState::Draining => "draining",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
