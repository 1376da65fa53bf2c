//! Connection tracker: owns the node connection and watches it for changes.

use alloy::{network::Ethereum, primitives::Address, providers::Provider};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

use super::{ConnectionStatus, ObserverId, ObserverRegistry, StatusChange};
use crate::{
    config::{Config, DEFAULT_POLL_INTERVAL},
    error::{AppError, Result},
    ethereum::{EthereumClient, RpcBackend},
    types::Network,
};

/// Tracks connection state for one node and notifies observers of changes.
///
/// Cloning is cheap and every clone shares the same state. Dropping the last
/// clone cancels the status poll.
#[derive(Clone)]
pub struct ConnectionTracker {
    state: Arc<TrackerState>,
}

struct TrackerState {
    backend: RwLock<Option<Arc<dyn RpcBackend>>>,
    status: watch::Sender<ConnectionStatus>,
    /// Last status observers were told about.
    snapshot: Mutex<ConnectionStatus>,
    observers: ObserverRegistry,
    poller: Mutex<Option<JoinHandle<()>>>,
    poll_interval: Duration,
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionTracker {
    /// Create a disconnected tracker polling every second once observed.
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    /// Create a disconnected tracker with a custom poll period.
    ///
    /// A zero period is refused by `on_status_changed`.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::default());
        Self {
            state: Arc::new(TrackerState {
                backend: RwLock::new(None),
                status,
                snapshot: Mutex::new(ConnectionStatus::default()),
                observers: ObserverRegistry::new(),
                poller: Mutex::new(None),
                poll_interval,
            }),
        }
    }

    /// Create a disconnected tracker using the configured poll period.
    pub fn from_config(config: &Config) -> Self {
        Self::with_poll_interval(config.poll_interval)
    }

    // ------------------------------------------------------------------------
    // Connecting
    // ------------------------------------------------------------------------

    /// Connect to a JSON-RPC endpoint over HTTP.
    ///
    /// Fetches the network and then the accounts; returns the accounts.
    pub async fn connect(&self, endpoint: &str) -> Result<Vec<Address>> {
        let client = EthereumClient::new(endpoint)?;
        self.use_backend(Arc::new(client)).await
    }

    /// Connect through an already configured alloy provider.
    pub async fn use_existing_provider<P>(&self, provider: &P) -> Result<Vec<Address>>
    where
        P: Provider<Ethereum>,
    {
        let client = EthereumClient::from_provider(provider);
        self.use_backend(Arc::new(client)).await
    }

    /// Connect through any backend.
    ///
    /// The backend is only installed once it has answered the network query,
    /// so a failed attempt leaves the previous connection in place.
    pub async fn use_backend(&self, backend: Arc<dyn RpcBackend>) -> Result<Vec<Address>> {
        let network = backend.network().await.map_err(|err| {
            tracing::warn!(error = %err, "Could not reach the node");
            err
        })?;

        *self.state.backend.write().await = Some(backend.clone());
        self.state.status.send_modify(|status| {
            status.connected = true;
            status.network = Some(network.clone());
        });

        let accounts = self.state.refresh_accounts(backend.as_ref()).await?;

        tracing::info!(network = %network, accounts = accounts.len(), "Connected to Ethereum node");

        Ok(accounts)
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Whether a node has been connected.
    pub fn is_connected(&self) -> bool {
        self.state.status.borrow().connected
    }

    /// Copy of the current status.
    pub fn status(&self) -> ConnectionStatus {
        self.state.status.borrow().clone()
    }

    /// Receiver that sees every status update, changed or not.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.state.status.subscribe()
    }

    /// Accounts from the last fetch, without asking the node.
    pub fn current_accounts(&self) -> Vec<Address> {
        self.state.status.borrow().accounts.clone()
    }

    /// The backend to talk to, or `NotConnected`.
    pub async fn backend(&self) -> Result<Arc<dyn RpcBackend>> {
        if !self.is_connected() {
            return Err(AppError::NotConnected);
        }
        self.state.installed_backend().await
    }

    /// Fetch the network from the node, updating the status.
    pub async fn get_network(&self) -> Result<Network> {
        let backend = self.state.installed_backend().await?;
        self.state.refresh_network(backend.as_ref()).await
    }

    /// Fetch the accounts from the node, updating the status.
    pub async fn get_accounts(&self) -> Result<Vec<Address>> {
        let backend = self.state.installed_backend().await?;
        self.state.refresh_accounts(backend.as_ref()).await
    }

    /// Fail with `WrongNetwork` unless the node is on the named network.
    pub async fn ensure_network(&self, name: &str) -> Result<Network> {
        let network = self.get_network().await?;
        if !network.is_named(name) {
            return Err(AppError::WrongNetwork {
                expected: name.to_string(),
                actual: network.name.clone(),
            });
        }
        Ok(network)
    }

    /// Fail with `NoAccounts` unless the node exposes at least one account.
    pub async fn ensure_accounts(&self) -> Result<Vec<Address>> {
        let accounts = self.get_accounts().await?;
        if accounts.is_empty() {
            return Err(AppError::NoAccounts);
        }
        Ok(accounts)
    }

    // ------------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------------

    /// Register a callback for status changes.
    ///
    /// The first registration starts the status poll, which needs a running
    /// Tokio runtime and a non-zero poll interval. Nothing is registered when
    /// either is missing.
    pub fn on_status_changed<F>(&self, callback: F) -> Result<ObserverId>
    where
        F: Fn(&ConnectionStatus) + Send + Sync + 'static,
    {
        if self.state.poll_interval.is_zero() {
            return Err(AppError::Config("status poll interval must be positive".into()));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::Runtime(format!("status polling needs a Tokio runtime: {e}")))?;

        let id = self.state.observers.register(Box::new(callback));

        let mut poller = self.state.poller();
        if !poller.as_ref().is_some_and(|handle| !handle.is_finished()) {
            let state = Arc::downgrade(&self.state);
            *poller = Some(runtime.spawn(poll_loop(state, self.state.poll_interval)));
            tracing::debug!(interval = ?self.state.poll_interval, "Status poll started");
        }

        Ok(id)
    }

    /// Remove a previously registered callback. The poll keeps running.
    pub fn remove_status_listener(&self, id: ObserverId) -> bool {
        self.state.observers.remove(id)
    }

    /// Cancel the status poll. A later registration starts it again.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.state.poller().take() {
            handle.abort();
            tracing::debug!("Status poll stopped");
        }
    }

    /// Whether the status poll is running.
    pub fn is_polling(&self) -> bool {
        self.state.poller().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Run one change-detection step. Returns whether observers were notified.
    pub async fn poll_once(&self) -> Result<bool> {
        self.state.poll_once().await
    }
}

impl TrackerState {
    async fn installed_backend(&self) -> Result<Arc<dyn RpcBackend>> {
        self.backend.read().await.clone().ok_or(AppError::NotConnected)
    }

    async fn refresh_network(&self, backend: &dyn RpcBackend) -> Result<Network> {
        let network = backend.network().await?;
        self.status.send_modify(|status| status.network = Some(network.clone()));
        Ok(network)
    }

    async fn refresh_accounts(&self, backend: &dyn RpcBackend) -> Result<Vec<Address>> {
        let accounts = backend.accounts().await?;
        self.status.send_modify(|status| status.accounts = accounts.clone());
        Ok(accounts)
    }

    async fn poll_once(&self) -> Result<bool> {
        let backend = self.installed_backend().await?;
        self.refresh_network(backend.as_ref()).await?;
        self.refresh_accounts(backend.as_ref()).await?;

        let current = self.status.borrow().clone();
        let change = {
            let mut snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
            let change = StatusChange::between(&snapshot, &current);
            *snapshot = current.clone();
            change
        };

        if !change.any() {
            return Ok(false);
        }

        tracing::debug!(
            connected = change.connected,
            network = change.network,
            accounts = change.accounts,
            "Connection status changed"
        );
        self.observers.notify(&current);
        Ok(true)
    }

    fn poller(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TrackerState {
    fn drop(&mut self) {
        if let Some(handle) = self.poller().take() {
            handle.abort();
        }
    }
}

/// Poll the node every `period`, first tick one period from now.
///
/// Ticks run one after another, so a slow node delays the next poll instead of
/// overlapping it. Errors are logged and the loop carries on.
async fn poll_loop(state: Weak<TrackerState>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(state) = state.upgrade() else {
            break;
        };

        match state.poll_once().await {
            Ok(_) => {}
            Err(AppError::NotConnected) => {
                tracing::debug!("Status poll skipped: not connected");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Status poll failed");
            }
        }
    }
}

impl std::fmt::Debug for ConnectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionTracker")
            .field("status", &*self.state.status.borrow())
            .field("observers", &self.state.observers)
            .field("poll_interval", &self.state.poll_interval)
            .finish()
    }
}
