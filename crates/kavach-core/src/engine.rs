//! The telemetry simulation engine.
//!
//! [`Engine`] owns every simulated value plus its random source and clock.
//! [`Engine::tick`] runs the generators in a fixed order (proximity, safety
//! metrics, subsystem status, alerts, actions) and returns the resulting
//! snapshot. [`Engine::start`] hands the engine to a [`Scheduler`] and
//! passes every snapshot to a publish callback, so readers only ever see
//! whole ticks. [`Engine::spawn`] wires that callback to a `watch` channel
//! for callers that only want the latest value.

use crate::action::{self, ActionFeed};
use crate::alert::{self, AlertFeed};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::metrics::{SafetyMetrics, SafetyMetricsGenerator};
use crate::proximity::{ProximityGenerator, ProximityReading};
use crate::rng::{RandomSource, StdRandom};
use crate::scheduler::{Scheduler, TickerHandle};
use crate::snapshot::DashboardSnapshot;
use crate::subsystem::{SubsystemBoard, SubsystemStatusGenerator};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub type SnapshotSender = watch::Sender<Arc<DashboardSnapshot>>;
pub type SnapshotReceiver = watch::Receiver<Arc<DashboardSnapshot>>;

pub struct Engine {
    config: EngineConfig,
    rng: Box<dyn RandomSource + Send>,
    clock: Box<dyn Clock + Send>,
    tick: u64,

    proximity_gen: ProximityGenerator,
    metrics_gen: SafetyMetricsGenerator,
    status_gen: SubsystemStatusGenerator,

    proximity: ProximityReading,
    metrics: SafetyMetrics,
    subsystems: SubsystemBoard,
    alerts: AlertFeed,
    actions: ActionFeed,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("tick", &self.tick)
            .field("proximity", &self.proximity)
            .field("metrics", &self.metrics)
            .field("subsystems", &self.subsystems)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine seeded from OS entropy and driven by the system clock.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng = StdRandom::from_entropy()?;
        Self::with_sources(config, Box::new(rng), Box::new(SystemClock))
    }

    /// Reproducible engine for a given seed.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_sources(
            config,
            Box::new(StdRandom::seeded(seed)),
            Box::new(SystemClock),
        )
    }

    pub fn with_sources(
        config: EngineConfig,
        rng: Box<dyn RandomSource + Send>,
        clock: Box<dyn Clock + Send>,
    ) -> Result<Self> {
        config.ensure_valid()?;

        let alerts = AlertFeed::new(
            config.feed_capacity,
            config.alert_probability,
            config.alert_messages.clone(),
            alert::initial_alerts(),
        );
        let actions = ActionFeed::new(
            config.feed_capacity,
            config.action_probability,
            config.active_probability,
            config.action_messages.clone(),
            action::initial_actions(),
        );

        let mut proximity = ProximityReading::initial();
        proximity.front = proximity.front.max(config.proximity_floor);
        proximity.rear = proximity.rear.max(config.proximity_floor);
        proximity.left = proximity.left.max(config.proximity_floor);
        proximity.right = proximity.right.max(config.proximity_floor);

        let floor = config.metric_floor;
        let ceiling = config.metric_ceiling;
        let initial = SafetyMetrics::initial();
        let metrics = SafetyMetrics {
            collision_prevention: initial.collision_prevention.clamp(floor, ceiling),
            geofence_compliance: initial.geofence_compliance.clamp(floor, ceiling),
            operator_alertness: initial.operator_alertness.clamp(floor, ceiling),
            system_health: initial.system_health.clamp(floor, ceiling),
        };

        Ok(Self {
            proximity_gen: ProximityGenerator::new(config.proximity_floor, config.max_step),
            metrics_gen: SafetyMetricsGenerator::new(floor, ceiling, config.max_step),
            status_gen: SubsystemStatusGenerator::new(
                config.status_flip_probability,
                config.healthy_probability,
            ),
            proximity,
            metrics,
            subsystems: SubsystemBoard::initial(),
            alerts,
            actions,
            config,
            rng,
            clock,
            tick: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn proximity(&self) -> &ProximityReading {
        &self.proximity
    }

    pub fn safety_metrics(&self) -> &SafetyMetrics {
        &self.metrics
    }

    pub fn subsystems(&self) -> &SubsystemBoard {
        &self.subsystems
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn actions(&self) -> &ActionFeed {
        &self.actions
    }

    /// Apply one simulation step and return the resulting snapshot.
    pub fn tick(&mut self) -> DashboardSnapshot {
        let rng: &mut dyn RandomSource = self.rng.as_mut();
        let clock: &dyn Clock = self.clock.as_ref();

        self.proximity_gen.advance(&mut self.proximity, rng);
        self.metrics_gen.advance(&mut self.metrics, rng);
        self.status_gen.advance(&mut self.subsystems, rng);
        self.alerts.advance(rng, clock);
        self.actions.advance(rng, clock);
        self.tick += 1;

        debug!(tick = self.tick, "tick applied");
        self.snapshot()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            tick: self.tick,
            time: self.clock.now(),
            proximity: self.proximity,
            safety_metrics: self.metrics,
            subsystem_status: self.subsystems.to_map(),
            alerts: self.alerts.feed().to_vec(),
            actions: self.actions.feed().to_vec(),
            maintenance_items: self.config.maintenance.clone(),
        }
    }

    /// Move the engine onto `scheduler`. `publish` is called with every
    /// snapshot, in tick order, from the ticker task.
    pub fn start<F>(mut self, scheduler: &Scheduler, mut publish: F) -> Result<TickerHandle>
    where
        F: FnMut(Arc<DashboardSnapshot>) + Send + 'static,
    {
        scheduler.start(move |_| {
            let snapshot = self.tick();
            publish(Arc::new(snapshot));
        })
    }

    /// Like [`Engine::start`], but publishing into a `watch` channel of its
    /// own. Slow readers see the latest tick, not every tick.
    pub fn spawn(self, scheduler: &Scheduler) -> Result<RunningEngine> {
        let (tx, rx): (SnapshotSender, SnapshotReceiver) =
            watch::channel(Arc::new(self.snapshot()));
        let ticker = self.start(scheduler, move |snapshot| {
            tx.send_replace(snapshot);
        })?;
        Ok(RunningEngine {
            ticker,
            snapshots: rx,
        })
    }
}

/// A started engine and the receiving side of its snapshot channel.
#[derive(Debug)]
pub struct RunningEngine {
    ticker: TickerHandle,
    snapshots: SnapshotReceiver,
}

impl RunningEngine {
    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshots.clone()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Stop ticking. The engine state is discarded.
    pub async fn stop(self) -> Result<u64> {
        self.ticker.stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertId;
    use crate::clock::FixedClock;
    use crate::error::KavachError;
    use crate::rng::ScriptedRandom;
    use crate::subsystem::Subsystem;
    use chrono::{Local, TimeZone};
    use std::time::Duration;

    fn fixed_clock() -> Box<FixedClock> {
        Box::new(FixedClock(
            Local
                .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
                .single()
                .unwrap(),
        ))
    }

    fn scripted(draws: Vec<f64>) -> Box<ScriptedRandom> {
        Box::new(ScriptedRandom::new(draws).unwrap())
    }

    fn assert_invariants(s: &DashboardSnapshot) {
        assert!(s.proximity.front >= 0.0);
        assert!(s.proximity.rear >= 0.0);
        assert!(s.proximity.left >= 0.0);
        assert!(s.proximity.right >= 0.0);
        for v in [
            s.safety_metrics.collision_prevention,
            s.safety_metrics.geofence_compliance,
            s.safety_metrics.operator_alertness,
            s.safety_metrics.system_health,
        ] {
            assert!((90.0..=100.0).contains(&v), "metric {v} out of range");
        }
        assert!(s.alerts.len() <= 3);
        assert!(s.actions.len() <= 3);
        assert_eq!(s.subsystem_status.len(), Subsystem::COUNT);
        for name in Subsystem::all() {
            assert!(s.subsystem_status.contains_key(name));
        }
    }

    #[test]
    fn initial_snapshot_matches_dashboard_defaults() {
        let engine =
            Engine::with_sources(EngineConfig::default(), scripted(vec![0.5]), fixed_clock())
                .unwrap();
        let s = engine.snapshot();
        assert_eq!(s.tick, 0);
        assert_eq!(s.proximity, ProximityReading::initial());
        assert_eq!(s.safety_metrics.collision_prevention, 98.0);
        assert_eq!(s.alerts.len(), 3);
        assert_eq!(s.actions.len(), 3);
        assert_eq!(s.maintenance_items.len(), 3);
        assert_invariants(&s);
    }

    #[test]
    fn invariants_hold_over_many_random_ticks() {
        let mut engine = Engine::seeded(EngineConfig::default(), 7).unwrap();
        let mut last_id = engine.alerts().next_id();
        for _ in 0..2_000 {
            let s = engine.tick();
            assert_invariants(&s);
            // injected alerts (id >= 4) form a prefix with strictly descending ids
            let injected = s.alerts.iter().take_while(|a| a.id.0 >= 4).count();
            assert!(s.alerts[injected..].iter().all(|a| a.id.0 < 4));
            assert!(s.alerts[..injected].windows(2).all(|w| w[0].id > w[1].id));
            assert!(engine.alerts().next_id() >= last_id);
            last_id = engine.alerts().next_id();
        }
        assert_eq!(engine.ticks(), 2_000);
    }

    #[test]
    fn zero_step_tick_keeps_proximity() {
        // 0.5 -> zero step for every walk, and every gate stays closed.
        let mut engine =
            Engine::with_sources(EngineConfig::default(), scripted(vec![0.5]), fixed_clock())
                .unwrap();
        let s = engine.tick();
        assert_eq!(s.proximity, ProximityReading::initial());
        assert_eq!(s.safety_metrics, SafetyMetrics::initial());
        assert_eq!(s.alerts, alert::initial_alerts());
        assert_eq!(s.actions, action::initial_actions());
    }

    #[test]
    fn max_draws_drive_values_up_and_pin_metrics() {
        let mut engine = Engine::with_sources(
            EngineConfig::default(),
            scripted(vec![0.999_999]),
            fixed_clock(),
        )
        .unwrap();
        let mut prev = engine.snapshot();
        for _ in 0..15 {
            let s = engine.tick();
            assert!(s.proximity.front > prev.proximity.front);
            assert!(s.proximity.rear > prev.proximity.rear);
            assert!(s.proximity.left > prev.proximity.left);
            assert!(s.proximity.right > prev.proximity.right);
            assert!(s.safety_metrics.system_health >= prev.safety_metrics.system_health);
            // gates never open at 0.999999
            assert_eq!(s.alerts, alert::initial_alerts());
            prev = s;
        }
        assert_eq!(prev.safety_metrics.collision_prevention, 100.0);
        assert_eq!(prev.safety_metrics.operator_alertness, 100.0);
    }

    #[test]
    fn injected_alert_evicts_oldest() {
        // 8 walk draws, status gate closed, alert gate open + 3 picks, action gate closed.
        let mut draws = vec![0.5; 8];
        draws.push(0.5); // status gate
        draws.extend([0.0, 0.0, 0.0, 0.0]); // alert gate, WARNING, first message, high
        draws.push(0.5); // action gate
        let mut engine =
            Engine::with_sources(EngineConfig::default(), scripted(draws), fixed_clock())
                .unwrap();

        let s = engine.tick();
        let ids: Vec<AlertId> = s.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AlertId(4), AlertId(1), AlertId(2)]);
        assert_eq!(s.alerts[0].message, "New worker detected in operation zone");
        assert_eq!(s.actions, action::initial_actions());
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = EngineConfig {
            feed_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::seeded(config, 1),
            Err(KavachError::InvalidConfig(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_engine_publishes_each_tick() {
        let engine = Engine::seeded(EngineConfig::default(), 11).unwrap();
        let scheduler = Scheduler::new(Duration::from_millis(1000)).unwrap();
        let running = engine.spawn(&scheduler).unwrap();
        let mut rx = running.subscribe();
        assert_eq!(running.latest().tick, 0);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().tick, 1);

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(running.latest().tick, 3);

        let fired = running.stop().await.unwrap();
        assert_eq!(fired, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_between_ticks_freezes_snapshot() {
        let engine = Engine::seeded(EngineConfig::default(), 3).unwrap();
        let scheduler = Scheduler::new(Duration::from_millis(500)).unwrap();
        let (tx, rx) = watch::channel(Arc::new(engine.snapshot()));
        let ticker = engine
            .start(&scheduler, move |s| {
                tx.send_replace(s);
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1_200)).await;
        assert_eq!(ticker.stop().await.unwrap(), 2);
        let frozen = rx.borrow().clone();
        assert_eq!(frozen.tick, 2);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(rx.borrow().tick, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn start_publishes_every_tick_to_an_unread_channel() {
        let config = EngineConfig {
            tick_interval_ms: 1,
            ..EngineConfig::default()
        };
        let engine = Engine::seeded(config, 5).unwrap();
        let scheduler = Scheduler::new(Duration::from_millis(1)).unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ticker = engine
            .start(&scheduler, move |s| {
                let _ = tx.send(s.tick);
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        let fired = ticker.stop().await.unwrap();

        let mut seen = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            seen.push(tick);
        }
        assert_eq!(seen, (1..=fired).collect::<Vec<_>>());
        assert!(fired >= 200);
    }
}
