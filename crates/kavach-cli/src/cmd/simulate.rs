use crate::output::print_snapshot;
use anyhow::Result;
use kavach_core::config::EngineConfig;
use kavach_core::scheduler::Scheduler;
use kavach_core::{DashboardSnapshot, Engine};
use tokio::sync::mpsc;

/// Run `ticks` simulation steps headless and print every resulting snapshot.
///
/// By default ticks are applied back to back; with `realtime` they are paced
/// by the scheduler at the configured interval. Snapshots are printed as they
/// are produced, never collected.
pub fn run(
    config: EngineConfig,
    ticks: u64,
    seed: Option<u64>,
    realtime: bool,
    json: bool,
) -> Result<()> {
    let mut printer = SnapshotPrinter::new(json, config.proximity_warning_m);
    let mut engine = match seed {
        Some(seed) => Engine::seeded(config, seed)?,
        None => Engine::new(config)?,
    };

    if realtime {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(run_realtime(engine, ticks, |s| printer.print(&s)))?;
    } else {
        for _ in 0..ticks {
            printer.print(&engine.tick())?;
        }
    }
    printer.finish()
}

/// Drive `engine` on its scheduler for exactly `ticks` ticks, handing each
/// snapshot to `emit` in order.
async fn run_realtime<F>(engine: Engine, ticks: u64, mut emit: F) -> Result<()>
where
    F: FnMut(DashboardSnapshot) -> Result<()>,
{
    if ticks == 0 {
        return Ok(());
    }
    let scheduler = Scheduler::new(engine.config().tick_interval())?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    // The engine stays on the ticker task; only the first `ticks` snapshots
    // are produced. Dropping the sender afterwards closes the channel.
    let mut engine = engine;
    let mut tx = Some(tx);
    let ticker = scheduler.start(move |_| {
        let Some(sender) = tx.as_ref() else { return };
        let snapshot = engine.tick();
        let done = snapshot.tick >= ticks;
        if sender.send(snapshot).is_err() || done {
            tx = None;
        }
    })?;

    let mut result = Ok(());
    while let Some(snapshot) = rx.recv().await {
        tracing::debug!(tick = snapshot.tick, "snapshot received");
        if let Err(e) = emit(snapshot) {
            result = Err(e);
            break;
        }
    }
    drop(rx);
    ticker.stop().await?;
    result
}

/// Streams snapshots either as a JSON array or as human-readable tables.
struct SnapshotPrinter {
    json: bool,
    warning_m: f64,
    printed: u64,
}

impl SnapshotPrinter {
    fn new(json: bool, warning_m: f64) -> Self {
        Self {
            json,
            warning_m,
            printed: 0,
        }
    }

    fn print(&mut self, snapshot: &DashboardSnapshot) -> Result<()> {
        if self.json {
            let open = if self.printed == 0 { "[" } else { "," };
            println!("{open}");
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        } else {
            if self.printed > 0 {
                println!();
            }
            print_snapshot(snapshot, self.warning_m);
        }
        self.printed += 1;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.json {
            println!("{}", if self.printed == 0 { "[]" } else { "]" });
        }
        Ok(())
    }
}
