use kavach_core::config::EngineConfig;
use kavach_core::engine::SnapshotSender;
use kavach_core::scheduler::{Scheduler, TickerHandle};
use kavach_core::{DashboardSnapshot, Engine};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::info;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub control: Arc<EngineControl>,
}

impl AppState {
    pub fn new(config: EngineConfig, seed: Option<u64>) -> kavach_core::Result<Self> {
        Ok(Self {
            control: Arc::new(EngineControl::new(config, seed)?),
        })
    }
}

/// Snapshots a slow SSE client may fall behind before it starts skipping.
const EVENT_BUFFER: usize = 256;

/// Owns the snapshot channels for the lifetime of the server. Each start
/// builds a fresh engine, so a restart begins again from the initial state.
///
/// `snapshots` holds the latest value for pull reads; `events` carries every
/// published snapshot in order for push subscribers.
pub struct EngineControl {
    config: EngineConfig,
    seed: Option<u64>,
    scheduler: Scheduler,
    snapshots: SnapshotSender,
    events: broadcast::Sender<Arc<DashboardSnapshot>>,
    ticker: Mutex<Option<TickerHandle>>,
}

impl EngineControl {
    pub fn new(config: EngineConfig, seed: Option<u64>) -> kavach_core::Result<Self> {
        let scheduler = Scheduler::new(config.tick_interval())?;
        let engine = build_engine(&config, seed)?;
        let (snapshots, _) = watch::channel(Arc::new(engine.snapshot()));
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Ok(Self {
            config,
            seed,
            scheduler,
            snapshots,
            events,
            ticker: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Every snapshot published after this call, in order.
    pub fn subscribe_events(&self) -> broadcast::Receiver<Arc<DashboardSnapshot>> {
        self.events.subscribe()
    }

    pub async fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| t.is_running())
    }

    /// Start a fresh engine. Returns `false` if one is already running.
    pub async fn start(&self) -> kavach_core::Result<bool> {
        let mut slot = self.ticker.lock().await;
        if slot.as_ref().is_some_and(|t| t.is_running()) {
            return Ok(false);
        }
        let engine = build_engine(&self.config, self.seed)?;
        let mut publish = publisher(self.snapshots.clone(), self.events.clone());
        publish(Arc::new(engine.snapshot()));
        *slot = Some(engine.start(&self.scheduler, publish)?);
        info!("engine started");
        Ok(true)
    }

    /// Stop the running engine. Returns the ticks it fired, or `None` if
    /// nothing was running.
    pub async fn stop(&self) -> kavach_core::Result<Option<u64>> {
        let mut slot = self.ticker.lock().await;
        match slot.take() {
            Some(ticker) => {
                let fired = ticker.stop().await?;
                info!(ticks = fired, "engine stopped");
                Ok(Some(fired))
            }
            None => Ok(None),
        }
    }
}

/// Latest value first, then the ordered stream, so an SSE client that reads
/// `latest` after subscribing can spot the overlap by pointer.
fn publisher(
    snapshots: SnapshotSender,
    events: broadcast::Sender<Arc<DashboardSnapshot>>,
) -> impl FnMut(Arc<DashboardSnapshot>) + Send + 'static {
    move |snapshot| {
        snapshots.send_replace(snapshot.clone());
        // no SSE clients connected
        let _ = events.send(snapshot);
    }
}

fn build_engine(config: &EngineConfig, seed: Option<u64>) -> kavach_core::Result<Engine> {
    match seed {
        Some(seed) => Engine::seeded(config.clone(), seed),
        None => Engine::new(config.clone()),
    }
}
