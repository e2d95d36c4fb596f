//! The accept and dispatch tasks.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use crate::lifecycle::ShutdownSignal;
use crate::net::{serve_connection, Listener, ListenerError};
use crate::routing::Router;

/// Pause after an accept error so a persistent failure (e.g. EMFILE) does
/// not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(10);

pub(crate) type Handoff = (TcpStream, SocketAddr);

/// Where the accept loop gets its connections from.
pub(crate) trait Incoming: Send {
    fn next_connection(&self) -> impl Future<Output = Result<Handoff, ListenerError>> + Send + '_;

    fn local_addr(&self) -> SocketAddr;
}

impl Incoming for Listener {
    fn next_connection(&self) -> impl Future<Output = Result<Handoff, ListenerError>> + Send + '_ {
        self.accept()
    }

    fn local_addr(&self) -> SocketAddr {
        Listener::local_addr(self)
    }
}

/// Accept connections and pass them to the dispatch task until shutdown.
///
/// Owns the listener: returning closes it, and dropping `handoff` tells the
/// dispatch task that no more connections will come.
pub(crate) async fn accept_loop<L: Incoming>(
    listener: L,
    handoff: mpsc::Sender<Handoff>,
    mut shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            biased;

            _ = shutdown.recv() => {
                tracing::debug!("Accept loop received shutdown signal");
                break;
            }
            accepted = listener.next_connection() => match accepted {
                Ok(conn) => {
                    if handoff.send(conn).await.is_err() {
                        tracing::warn!("Dispatch task is gone, stopping accept loop");
                        break;
                    }
                }
                Err(e) => {
                    if shutdown.is_triggered() {
                        break;
                    }
                    tracing::error!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            },
        }
    }

    let address = listener.local_addr();
    drop(listener);
    tracing::debug!(address = %address, "Listener closed");
}

/// Spawn one handler per connection, then wait for all of them once the
/// accept loop has hung up.
pub(crate) async fn dispatch_loop(
    mut incoming: mpsc::Receiver<Handoff>,
    router: Router,
    read_timeout: Duration,
) {
    let mut handlers = JoinSet::new();

    loop {
        tokio::select! {
            next = incoming.recv() => match next {
                Some((stream, peer)) => {
                    handlers.spawn(serve_connection(stream, peer, router.clone(), read_timeout));
                }
                None => break,
            },
            Some(done) = handlers.join_next(), if !handlers.is_empty() => log_handler_exit(done),
        }
    }

    tracing::debug!(in_flight = handlers.len(), "Waiting for in-flight connections to finish");
    while let Some(done) = handlers.join_next().await {
        log_handler_exit(done);
    }
    tracing::debug!("All connections finished");
}

fn log_handler_exit(done: Result<(), JoinError>) {
    if let Err(e) = done {
        if e.is_panic() {
            tracing::error!(error = %e, "Connection handler panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    /// Replays queued accept results, then waits forever.
    struct Scripted {
        results: Mutex<VecDeque<Result<Handoff, ListenerError>>>,
        address: SocketAddr,
    }

    impl Incoming for Scripted {
        fn next_connection(
            &self,
        ) -> impl Future<Output = Result<Handoff, ListenerError>> + Send + '_ {
            let next = self.results.lock().unwrap().pop_front();
            async move {
                match next {
                    Some(result) => result,
                    None => std::future::pending().await,
                }
            }
        }

        fn local_addr(&self) -> SocketAddr {
            self.address
        }
    }

    async fn connected_stream() -> Handoff {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let _client = TcpStream::connect(address).await.unwrap();
        listener.accept().await.unwrap()
    }

    #[tokio::test]
    async fn accept_error_does_not_stop_the_loop() {
        let (stream, peer) = connected_stream().await;
        let failure = std::io::Error::new(std::io::ErrorKind::ConnectionAborted, "aborted");
        let incoming = Scripted {
            results: Mutex::new(VecDeque::from([
                Err(ListenerError::Accept(failure)),
                Ok((stream, peer)),
            ])),
            address: "127.0.0.1:0".parse().unwrap(),
        };

        let shutdown = Shutdown::new();
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(accept_loop(incoming, tx, shutdown.subscribe()));

        let (_, handed_off) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("accept loop stalled after an error")
            .expect("accept loop exited after an error");
        assert_eq!(handed_off, peer);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(rx.recv().await.is_none());
    }
}
