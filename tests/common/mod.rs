//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pawnshop::client::PawnShopClient;
use pawnshop::inventory::Inventory;
use pawnshop::server::ServerError;
use pawnshop::shop::PawnShop;
use pawnshop::{PawnShopServer, ShopConfig};
use tokio::task::JoinHandle;

/// A server running on an ephemeral port.
pub struct RunningServer {
    pub server: Arc<PawnShopServer>,
    pub addr: SocketAddr,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    pub fn client(&self) -> PawnShopClient {
        PawnShopClient::new(self.addr.to_string()).with_timeout(Duration::from_secs(5))
    }

    /// Stop the server and wait for it to drain.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.server.stop();
        self.join().await
    }

    /// Wait for `start` to return without stopping the server first.
    pub async fn join(self) -> Result<(), ServerError> {
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

pub fn test_config(size: usize) -> ShopConfig {
    let mut config = ShopConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.inventory.size = size;
    config
}

/// Start `server` in the background and wait until it accepts connections.
pub async fn run(server: PawnShopServer) -> RunningServer {
    let server = Arc::new(server);
    let task_server = Arc::clone(&server);
    let handle = tokio::spawn(async move { task_server.start().await });

    for _ in 0..200 {
        if server.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(server.is_running(), "server did not start");

    let addr = server.local_addr().expect("running server has an address");
    RunningServer { server, addr, handle }
}

/// Start a server whose inventory the test can inspect.
#[allow(dead_code)]
pub async fn start_with_inventory(config: ShopConfig) -> (RunningServer, Arc<Inventory>) {
    let inventory = Arc::new(Inventory::new(config.inventory.size).unwrap());
    let shop = PawnShop::new(inventory.clone());
    let running = run(PawnShopServer::with_handler(config, Arc::new(shop))).await;
    (running, inventory)
}
