use crate::output::{print_json, print_snapshot};
use kavach_core::config::EngineConfig;
use kavach_core::Engine;

/// Print the state the engine starts from, without ticking.
pub fn run(config: EngineConfig, json: bool) -> anyhow::Result<()> {
    let warning_m = config.proximity_warning_m;
    let engine = Engine::new(config)?;
    let snapshot = engine.snapshot();
    if json {
        print_json(&snapshot)
    } else {
        print_snapshot(&snapshot, warning_m);
        Ok(())
    }
}
