use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio::{runtime, signal};
use tracing::{error, info, trace};

use crate::render::Assets;
use crate::service::Server;
use crate::store::ItemStore;
use crate::AppError::IllegalStateError;
use crate::{global_config, AppResult};

/// Process-level owner of the inventory server: builds the runtime, loads
/// the templates/assets, runs the TCP server and drives graceful shutdown.
pub struct Tracker {
    store: Arc<ItemStore>,
}

impl Tracker {
    pub fn new() -> Self {
        Tracker {
            store: Arc::new(ItemStore::new()),
        }
    }

    // Graceful shutdown sequence:
    // 1. ctrl-c cancels the accept loop inside `run_tcp_server`.
    // 2. The shutdown broadcast tells every in-flight connection handler to
    //    stop waiting for request bytes; handlers mid-response finish their
    //    single write first.
    // 3. When the server and every handler drop, their `shutdown_complete_tx`
    //    clones drop with them and the final `recv` below returns.
    pub fn start(&mut self) -> AppResult<()> {
        let (notify_shutdown, _) = broadcast::channel(1);
        let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);

        // startup tokio runtime
        let rt = runtime::Builder::new_multi_thread().enable_all().build()?;

        let general_config = &global_config().general;
        let assets = Arc::new(Assets::load(
            &general_config.template_dir,
            &general_config.static_dir,
        )?);

        rt.block_on(Self::run_tcp_server(
            self.store.clone(),
            assets,
            notify_shutdown.clone(),
            shutdown_complete_tx,
        ))?;

        // tcp server is down; wake any handler still reading
        let _ = notify_shutdown.send(());
        trace!("waiting for shutdown complete...");
        rt.block_on(shutdown_complete_rx.recv());
        info!("inventory server shutdown complete");
        Ok(())
    }

    async fn run_tcp_server(
        store: Arc<ItemStore>,
        assets: Arc<Assets>,
        notify_shutdown: broadcast::Sender<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> AppResult<()> {
        let network_config = &global_config().network;
        let listen_address = format!("{}:{}", network_config.ip, network_config.port);

        let bind_result = TcpListener::bind(&listen_address).await;
        if let Err(err) = &bind_result {
            let error_msg = format!(
                "Failed to bind server to address: {} - Error: {}",
                listen_address, err
            );
            error!("{}", error_msg);
            return Err(IllegalStateError(error_msg));
        }
        info!("tcp server binding to {} for listening", &listen_address);

        let server = Server::new(
            bind_result?,
            Arc::new(Semaphore::new(network_config.max_connection)),
            notify_shutdown,
            shutdown_complete_tx,
            store,
            assets,
        );

        tokio::select! {
            res = server.run() => {
                if let Err(err) = res {
                    error!(cause = %err, "failed to accept");
                }
            }
            _ = signal::ctrl_c() => {
                info!("get shutdown signal");
            }
        }

        Ok(())
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Tracker::new()
    }
}
