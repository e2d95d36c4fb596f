//! Pawn shop exchange service library.

pub mod client;
pub mod config;
pub mod handler;
pub mod inventory;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod protocol;
pub mod routing;
pub mod server;
pub mod shop;

pub use config::ShopConfig;
pub use handler::OfferHandler;
pub use lifecycle::Shutdown;
pub use server::PawnShopServer;
