//! Minimal client for the pawn shop server.
//!
//! Sends a single offer per connection and waits for the server to answer and
//! close. Used by the command line client and the end-to-end tests.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::protocol::codec::{self, CodecError};
use crate::protocol::{Answer, Offer};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Talks to one server address.
#[derive(Debug, Clone)]
pub struct PawnShopClient {
    address: String,
    timeout: Duration,
}

impl PawnShopClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Bound on the whole exchange, connect included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `offer` and return the server's answer.
    pub async fn send_offer(&self, offer: &Offer) -> Result<Answer, ClientError> {
        tokio::time::timeout(self.timeout, self.exchange(offer))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
    }

    async fn exchange(&self, offer: &Offer) -> Result<Answer, ClientError> {
        let mut stream = TcpStream::connect(self.address.as_str())
            .await
            .map_err(|source| ClientError::Connect {
                address: self.address.clone(),
                source,
            })?;

        stream.write_all(&codec::encode_offer(offer)?).await?;

        let mut reply = Vec::new();
        stream.read_to_end(&mut reply).await?;
        tracing::debug!(reply = %String::from_utf8_lossy(&reply), "Received answer");

        Ok(codec::decode_answer(&reply)?)
    }
}
