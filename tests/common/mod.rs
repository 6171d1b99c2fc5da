//! Shared utilities for integration testing.

use async_trait::async_trait;
use refetch::error::{FetchError, FetchResult};
use refetch::transport::Transport;
use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Opt-in logging for debugging test runs; honors `RUST_LOG`.
#[allow(dead_code)]
pub fn init_logging() {
    refetch::observability::logging::init_logging("info");
}

/// Start a programmable mock backend that answers every request with the
/// (status, JSON body) pair produced by `handler`, which receives the
/// zero-based request index.
#[allow(dead_code)]
pub async fn start_json_backend<F, Fut>(addr: SocketAddr, handler: F)
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let handler = Arc::new(handler);
    let hits = Arc::new(AtomicU32::new(0));

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    let call = hits.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        // Drain the request headers before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = handler(call).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

type ScriptFuture = Pin<Box<dyn Future<Output = FetchResult<Value>> + Send>>;

/// An in-process transport scripted per call index, for exercising the
/// coordinator without a network.
///
/// By default the script's future runs to completion even when the
/// generation's token fires, which models a non-cancellable operation and
/// lets tests observe the stale-discard path. `cancel_aware` builds one
/// that aborts with [`FetchError::Cancelled`] instead, like the real HTTP
/// transport.
pub struct ScriptedTransport {
    calls: AtomicU32,
    cancel_aware: bool,
    script: Box<dyn Fn(u32) -> ScriptFuture + Send + Sync>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(u32) -> ScriptFuture + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            cancel_aware: false,
            script: Box::new(script),
        })
    }

    pub fn cancel_aware<F>(script: F) -> Arc<Self>
    where
        F: Fn(u32) -> ScriptFuture + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            cancel_aware: true,
            script: Box::new(script),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch_json(&self, _url: &str, cancel: CancellationToken) -> FetchResult<Value> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let work = (self.script)(call);

        if self.cancel_aware {
            tokio::select! {
                _ = cancel.cancelled() => Err(FetchError::Cancelled),
                result = work => result,
            }
        } else {
            work.await
        }
    }
}
