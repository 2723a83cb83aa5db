use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio::time::{self, Duration};
use tracing::{debug, error};

use crate::http::response::{STATUS_BAD_REQUEST, STATUS_PAYLOAD_TOO_LARGE};
use crate::http::{HttpRequest, HttpResponse};
use crate::network::Connection;
use crate::render::Assets;
use crate::request::{RequestContext, RequestProcessor, RouteRequest};
use crate::store::ItemStore;
use crate::{AppError, AppResult};

use super::{global_config, Shutdown};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

// handler for each connection
struct ConnectionHandler {
    notify_shutdown: broadcast::Sender<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
    connection_id: u64,
    connection: Connection,
    writer: BufWriter<OwnedWriteHalf>,
    context: RequestContext,
}

impl ConnectionHandler {
    /// Serves exactly one request, then returns; the sockets drop with the
    /// handler, which is what closes the connection.
    async fn handle_connection(&mut self) -> AppResult<()> {
        let mut shutdown = Shutdown::new(self.notify_shutdown.subscribe());

        let read_result = tokio::select! {
            res = self.connection.read_request() => res,
            _ = shutdown.recv() => {
                debug!("connection handler exit read loop after recv shutdown signal");
                return Ok(());
            }
        };

        let maybe_frame = match read_result {
            Ok(maybe_frame) => maybe_frame,
            Err(AppError::RequestTooLarge(reason)) => {
                debug!("connection {}: {}", self.connection_id, reason);
                return self
                    .write_response(&HttpResponse::plain(
                        STATUS_PAYLOAD_TOO_LARGE,
                        "Petición demasiado grande",
                    ))
                    .await;
            }
            Err(e) => return Err(e),
        };

        // peer disconnected before sending anything; close without responding
        let frame = match maybe_frame {
            Some(frame) => frame,
            None => return Ok(()),
        };

        let response = match HttpRequest::parse(frame) {
            Ok(request) => {
                debug!(
                    "connection {}: {} {}",
                    self.connection_id, request.method, request.path
                );
                match RouteRequest::parse_from(&request) {
                    Ok(route) => RequestProcessor::process_request(route, &self.context),
                    Err(response) => response,
                }
            }
            Err(AppError::MalformedRequest(message)) => {
                HttpResponse::plain(STATUS_BAD_REQUEST, message)
            }
            Err(e) => return Err(e),
        };

        self.write_response(&response).await
    }

    /// Single-shot write; a failure tears the connection down, nothing is
    /// retried.
    async fn write_response(&mut self, response: &HttpResponse) -> AppResult<()> {
        self.writer
            .write_all(&response.encode())
            .await
            .map_err(|e| AppError::DetailedIoError(format!("write response error: {}", e)))?;
        self.writer
            .flush()
            .await
            .map_err(|e| AppError::DetailedIoError(format!("flush response error: {}", e)))?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    limit_connections: Arc<Semaphore>,
    notify_shutdown: broadcast::Sender<()>,
    shutdown_complete_tx: mpsc::Sender<()>,
    store: Arc<ItemStore>,
    assets: Arc<Assets>,
}

impl Server {
    pub fn new(
        listener: TcpListener,
        limit_connections: Arc<Semaphore>,
        notify_shutdown: broadcast::Sender<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
        store: Arc<ItemStore>,
        assets: Arc<Assets>,
    ) -> Self {
        Server {
            listener,
            limit_connections,
            notify_shutdown,
            shutdown_complete_tx,
            store,
            assets,
        }
    }

    /// Accepts connections until the listener fails, spawning one task per
    /// connection. A permit caps how many run at once; each task serves a
    /// single request and releases its permit when it finishes.
    ///
    /// # Returns
    /// Under normal operation, continuously accepts new connections.
    /// Exits with an error if accepting fails past the backoff limit.
    pub async fn run(&self) -> AppResult<()> {
        let network_config = &global_config().network;

        loop {
            let permit = self
                .limit_connections
                .clone()
                .acquire_owned()
                .await
                .unwrap();

            debug!("accept new connection");

            let socket = self.accept().await?;

            let connection_id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
            let (reader, writer) = socket.into_split();

            let mut handler = ConnectionHandler {
                _shutdown_complete_tx: self.shutdown_complete_tx.clone(),
                notify_shutdown: self.notify_shutdown.clone(),
                connection_id,
                connection: Connection::new(
                    reader,
                    network_config.conn_read_buffer_size,
                    network_config.max_request_size,
                ),
                writer: BufWriter::new(writer),
                context: RequestContext::new(self.store.clone(), self.assets.clone()),
            };

            tokio::spawn(async move {
                if let Err(err) = handler.handle_connection().await {
                    error!("Connection error: {:?}", err);
                }
                // whether gracefully or unexpectedly closed, release connection
                drop(permit);
            });
        }
    }

    async fn accept(&self) -> AppResult<TcpStream> {
        let mut backoff = 1;

        loop {
            match self.listener.accept().await {
                Ok((socket, _)) => return Ok(socket),
                Err(err) => {
                    if backoff > 64 {
                        return Err(AppError::DetailedIoError(format!(
                            "accept tcp server error: {}",
                            err
                        )));
                    }
                }
            }

            time::sleep(Duration::from_secs(backoff)).await;
            backoff *= 2;
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        debug!("tcp server dropped");
    }
}
impl Drop for ConnectionHandler {
    fn drop(&mut self) {
        debug!("connection handler dropped");
    }
}
