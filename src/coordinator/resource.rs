//! Fetch lifecycle coordination for a single resource key.

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time;

use crate::cache::ResourceCache;
use crate::config::validation::{validate_resource_url, ValidationError};
use crate::config::FetcherConfig;
use crate::coordinator::state::ResourceState;
use crate::error::FetchError;
use crate::lifecycle::CancelController;
use crate::observability::metrics;
use crate::resilience::backoff::{strategy_from_config, RetryStrategy};
use crate::resilience::RetryExecutor;
use crate::transport::Transport;

/// Invoked once per settled, still-latest successful generation.
pub type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Invoked once per settled, still-latest failed generation.
pub type ErrorCallback = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Coordinates the fetch lifecycle for one resource key.
///
/// Owns the observable [`ResourceState`], the generation counter that
/// discards superseded results, the cancellation controller for in-flight
/// work, and the retry executor. The cache is injected so independent
/// coordinators referencing the same key share values.
pub struct ResourceCoordinator<T> {
    key: String,
    url: String,
    cache: ResourceCache<T>,
    retry: RetryExecutor,
    cancel: CancelController,
    transport: Arc<dyn Transport>,
    generation: AtomicU64,
    state_tx: watch::Sender<ResourceState<T>>,
    poll_interval: Duration,
    polling_enabled: bool,
    on_success: Option<SuccessCallback<T>>,
    on_error: Option<ErrorCallback>,
}

impl<T> ResourceCoordinator<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Build a coordinator for `key`, fetched from `url`.
    ///
    /// The URL is validated up front so a malformed one fails here rather
    /// than on the first poll.
    pub fn new(
        key: impl Into<String>,
        url: impl Into<String>,
        config: &FetcherConfig,
        cache: ResourceCache<T>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ValidationError> {
        let url = url.into();
        validate_resource_url(&url)?;

        let (state_tx, _) = watch::channel(ResourceState::default());
        Ok(Self {
            key: key.into(),
            url,
            cache,
            retry: RetryExecutor::new(config.retry.max_retries, strategy_from_config(&config.retry)),
            cancel: CancelController::new(),
            transport,
            generation: AtomicU64::new(0),
            state_tx,
            poll_interval: config.polling.interval(),
            polling_enabled: config.polling.enabled,
            on_success: None,
            on_error: None,
        })
    }

    /// Replace the backoff strategy while keeping the configured attempt
    /// ceiling.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry = RetryExecutor::new(self.retry.max_retries(), strategy);
        self
    }

    /// Register a callback for each committed success.
    pub fn with_on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Register a callback for each committed failure.
    pub fn with_on_error(mut self, callback: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// The resource key this coordinator owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current snapshot of the observable state.
    pub fn state(&self) -> ResourceState<T> {
        self.state_tx.borrow().clone()
    }

    /// Live view of the observable state.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state_tx.subscribe()
    }

    /// Abort whatever request is currently in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drop this key's cache entry so the next non-forced fetch goes to
    /// the network.
    pub fn invalidate(&self) {
        self.cache.invalidate(&self.key);
    }

    /// One pass of the fetch lifecycle.
    ///
    /// Unless `force` is set, a fresh cache entry is committed without a
    /// network call. Otherwise the transport runs under the retry
    /// executor, and the result (success or failure) is committed only
    /// if no newer generation has started in the meantime. Superseded
    /// results are discarded without touching state or callbacks.
    pub async fn fetch(&self, force: bool) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !force {
            if let Some(value) = self.cache.get(&self.key) {
                tracing::debug!(key = %self.key, generation = my_generation, "serving cached value");
                self.state_tx.send_modify(|state| state.data = Some(value));
                metrics::record_fetch("cache_hit");
                return;
            }
        }

        self.state_tx.send_modify(|state| state.is_validating = true);

        // Supersede: the previous generation's token dies with it.
        self.cancel.cancel();
        let token = self.cancel.signal();

        let result = self
            .retry
            .execute(&token, || {
                let transport = Arc::clone(&self.transport);
                let url = self.url.clone();
                let token = token.clone();
                async move {
                    let raw = transport.fetch_json(&url, token).await?;
                    Ok(serde_json::from_value::<T>(raw)?)
                }
            })
            .await;

        if self.generation.load(Ordering::SeqCst) != my_generation {
            tracing::debug!(key = %self.key, generation = my_generation, "discarding superseded result");
            metrics::record_stale_discard();
            return;
        }

        match result {
            Ok(data) => {
                self.cache.set(&self.key, data.clone());
                self.state_tx.send_replace(ResourceState {
                    data: Some(data.clone()),
                    error: None,
                    is_validating: false,
                });
                metrics::record_fetch("success");
                tracing::debug!(key = %self.key, generation = my_generation, "fetch committed");
                if let Some(callback) = &self.on_success {
                    callback(&data);
                }
            }
            Err(error) => {
                let error = Arc::new(error);
                self.state_tx.send_modify(|state| {
                    state.error = Some(Arc::clone(&error));
                    state.is_validating = false;
                });
                metrics::record_fetch("failure");
                tracing::warn!(key = %self.key, generation = my_generation, error = %error, "fetch failed");
                if let Some(callback) = &self.on_error {
                    callback(&error);
                }
            }
        }
    }

    /// Manual update entry point.
    ///
    /// With a value: an authoritative write-through to cache and state,
    /// no network round-trip. Without one: a forced revalidation.
    pub async fn mutate(&self, value: Option<T>) {
        match value {
            Some(value) => {
                tracing::debug!(key = %self.key, "manual write-through");
                self.cache.set(&self.key, value.clone());
                self.state_tx.send_modify(|state| state.data = Some(value));
            }
            None => self.fetch(true).await,
        }
    }

    /// Drive the polling lifecycle until shutdown: an immediate
    /// cache-first fetch, then forced revalidation every deduping
    /// interval.
    pub async fn run(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        self.fetch(false).await;

        if !self.polling_enabled {
            tracing::info!(key = %self.key, "polling disabled, initial fetch only");
            return;
        }

        tracing::info!(
            key = %self.key,
            interval_ms = self.poll_interval.as_millis() as u64,
            "poller starting"
        );

        let first_tick = time::Instant::now() + self.poll_interval;
        let mut ticker = time::interval_at(first_tick, self.poll_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.fetch(true).await;
                }
                _ = shutdown.recv() => {
                    tracing::info!(key = %self.key, "poller received shutdown, exiting loop");
                    self.cancel.cancel();
                    break;
                }
            }
        }
    }

    /// Spawn [`ResourceCoordinator::run`] on the current runtime and hand
    /// back its lifecycle handle.
    pub fn spawn(self: &Arc<Self>) -> PollerHandle<T> {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let task = tokio::spawn(Arc::clone(self).run(shutdown_rx));
        PollerHandle {
            coordinator: Arc::clone(self),
            shutdown_tx,
            task,
        }
    }
}

/// Owns a spawned poll task. Dropping the handle does not stop the task;
/// call [`PollerHandle::stop`].
pub struct PollerHandle<T> {
    coordinator: Arc<ResourceCoordinator<T>>,
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl<T> PollerHandle<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Tear the poller down: abort in-flight work, signal the loop, and
    /// wait for it to exit. Any result that still settles is discarded by
    /// the generation check or commits at most a cancellation error that
    /// no observer reads.
    pub async fn stop(self) {
        self.coordinator.cancel();
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }

    /// Signal shutdown without waiting for the loop to exit.
    pub fn trigger(&self) {
        self.coordinator.cancel();
        let _ = self.shutdown_tx.send(());
    }

    /// The coordinator driven by this poller.
    pub fn coordinator(&self) -> &Arc<ResourceCoordinator<T>> {
        &self.coordinator
    }
}
