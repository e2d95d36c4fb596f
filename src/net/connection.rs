//! Per-connection request handling.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Read exactly one request, bounded by the read timeout
//! - Route it and write exactly one reply, then close
//! - Answer REJECT for anything that goes wrong while a reply is still possible

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;

use crate::observability::metrics;
use crate::protocol::codec::{self, CodecError, FrameStatus, REJECT_FRAME};
use crate::routing::Router;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

const READ_CHUNK: usize = 512;

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Failures scoped to a single connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to read request: {0}")]
    Read(#[source] std::io::Error),

    #[error("no complete request within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("failed to write answer: {0}")]
    Write(#[source] std::io::Error),
}

impl ConnectionError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionError::Read(_) => "read",
            ConnectionError::Timeout(_) => "timeout",
            ConnectionError::Codec(CodecError::Encode(_)) => "encode",
            ConnectionError::Codec(_) => "decode",
            ConnectionError::Write(_) => "write",
        }
    }
}

/// Serve one request on `stream` and close it.
///
/// Never returns an error: failures are logged, answered with REJECT when
/// possible, and stay inside this connection.
pub async fn serve_connection<S>(
    stream: S,
    peer: SocketAddr,
    router: Router,
    read_timeout: Duration,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let id = ConnectionId::new();
    let span = tracing::info_span!("connection", id = %id, peer = %peer);

    async move {
        let mut stream = stream;
        metrics::record_connection_opened();

        if let Err(e) = exchange(&mut stream, &router, read_timeout).await {
            tracing::error!(error = %e, "Connection failed");
            metrics::record_connection_error(e.kind());
        }

        if let Err(e) = stream.shutdown().await {
            tracing::debug!(error = %e, "Failed to close connection cleanly");
        }
        metrics::record_connection_closed();
    }
    .instrument(span)
    .await
}

async fn exchange<S>(
    stream: &mut S,
    router: &Router,
    read_timeout: Duration,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = match tokio::time::timeout(read_timeout, read_request(stream)).await {
        Ok(Ok(Some(request))) => request,
        Ok(Ok(None)) => {
            tracing::debug!("Peer closed before sending a request");
            return Ok(());
        }
        Ok(Err(e)) => return Err(e),
        Err(_) => {
            write_reject(stream).await;
            return Err(ConnectionError::Timeout(read_timeout));
        }
    };

    let offer = match codec::decode_offer(&request) {
        Ok(offer) => offer,
        Err(e) => {
            write_reject(stream).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        code = %offer.kind,
        offer = offer.offer,
        demand = offer.demand,
        "Received offer from client"
    );

    let answer = router.route(&offer);
    metrics::record_offer(if answer.is_accepted() { "accepted" } else { "rejected" });

    let reply = match codec::encode_answer(&answer) {
        Ok(reply) => reply,
        Err(e) => {
            write_reject(stream).await;
            return Err(e.into());
        }
    };

    tracing::info!(code = answer.code.as_str(), value = ?answer.value, "Sending answer to client");
    stream.write_all(&reply).await.map_err(ConnectionError::Write)?;
    stream.flush().await.map_err(ConnectionError::Write)?;
    Ok(())
}

/// Read until one complete request is buffered.
///
/// `Ok(None)` means the peer closed without sending anything.
async fn read_request<S>(stream: &mut S) -> Result<Option<Vec<u8>>, ConnectionError>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = stream.read(&mut chunk).await.map_err(ConnectionError::Read)?;
        if n == 0 {
            return Ok(if buf.is_empty() { None } else { Some(buf) });
        }
        buf.extend_from_slice(&chunk[..n]);

        if codec::frame_status(&buf) == FrameStatus::Complete {
            return Ok(Some(buf));
        }
    }
}

async fn write_reject<S>(stream: &mut S)
where
    S: AsyncWrite + Unpin,
{
    if let Err(e) = stream.write_all(REJECT_FRAME).await {
        tracing::debug!(error = %e, "Failed to write rejection");
    }
}
