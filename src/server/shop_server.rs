//! The pawn shop TCP server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::ShopConfig;
use crate::handler::OfferHandler;
use crate::inventory::{Inventory, InventoryError};
use crate::lifecycle::Shutdown;
use crate::net::{Listener, ListenerError};
use crate::routing::Router;
use crate::server::state::ServerState;
use crate::server::tasks::{accept_loop, dispatch_loop};
use crate::shop::{PawnShop, Validator, ValidatorError};

/// Errors surfaced to whoever builds or starts the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server cannot start while {0}")]
    InvalidState(ServerState),
}

/// TCP server that answers one offer per connection.
pub struct PawnShopServer {
    config: ShopConfig,
    router: Router,
    state: Mutex<ServerState>,
    shutdown: Shutdown,
    local_addr: OnceLock<SocketAddr>,
}

impl PawnShopServer {
    /// Build a server with a fresh inventory and the configured rules.
    pub fn new(config: ShopConfig) -> Result<Self, ServerError> {
        let inventory = Arc::new(Inventory::new(config.inventory.size)?);
        let validator = Validator::from_names(config.policy.rules.as_slice())?;

        tracing::debug!(
            size = config.inventory.size,
            rules = ?config.policy.rules,
            inventory = %inventory,
            "Created new pawn shop"
        );

        let shop = PawnShop::with_validator(inventory, validator);
        Ok(Self::with_handler(config, Arc::new(shop)))
    }

    /// Build a server that routes `PAWN` requests to `handler`.
    pub fn with_handler(config: ShopConfig, handler: Arc<dyn OfferHandler>) -> Self {
        Self {
            config,
            router: Router::new(handler),
            state: Mutex::new(ServerState::Created),
            shutdown: Shutdown::new(),
            local_addr: OnceLock::new(),
        }
    }

    /// Bind and serve until [`stop`](Self::stop) is called and every accepted
    /// connection has been answered.
    ///
    /// A bind failure is returned and leaves the server in `Created`.
    pub async fn start(&self) -> Result<(), ServerError> {
        let current = self.state();
        if current != ServerState::Created {
            return Err(ServerError::InvalidState(current));
        }

        let listener = Listener::bind(&self.config.listener).await?;
        let address = listener.local_addr();
        let _ = self.local_addr.set(address);

        {
            let mut state = self.state.lock().expect("server state mutex poisoned");
            match *state {
                ServerState::Created => *state = ServerState::Listening,
                ServerState::Stopped => {
                    tracing::info!("Server stopped before it started listening");
                    return Ok(());
                }
                other => return Err(ServerError::InvalidState(other)),
            }
        }

        let (handoff_tx, handoff_rx) = mpsc::channel(self.config.listener.dispatch_queue.max(1));
        let accept = tokio::spawn(accept_loop(listener, handoff_tx, self.shutdown.subscribe()));
        let dispatch = tokio::spawn(dispatch_loop(
            handoff_rx,
            self.router.clone(),
            self.config.timeouts.read(),
        ));

        tracing::info!(
            address = %address,
            inventory = %self.router.holdings(),
            "Started server"
        );

        let (accepted, dispatched) = tokio::join!(accept, dispatch);
        if let Err(e) = accepted {
            tracing::error!(error = %e, "Accept task failed");
        }
        if let Err(e) = dispatched {
            tracing::error!(error = %e, "Dispatch task failed");
        }

        self.set_state(ServerState::Stopped);
        tracing::info!("Server has stopped");
        Ok(())
    }

    /// Stop accepting connections and let in-flight ones finish.
    ///
    /// Safe to call any number of times, from any task, before or after
    /// [`start`](Self::start).
    pub fn stop(&self) {
        let next = {
            let mut state = self.state.lock().expect("server state mutex poisoned");
            *state = state.on_stop();
            *state
        };
        if self.shutdown.trigger() {
            tracing::info!(state = %next, "Stopping server");
        }
    }

    /// True while the server is accepting new connections.
    pub fn is_running(&self) -> bool {
        self.state() == ServerState::Listening
    }

    pub fn state(&self) -> ServerState {
        *self.state.lock().expect("server state mutex poisoned")
    }

    /// Address the listener is bound to, once `start` has bound it.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    fn set_state(&self, next: ServerState) {
        *self.state.lock().expect("server state mutex poisoned") = next;
    }
}
