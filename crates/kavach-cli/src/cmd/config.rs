use crate::config_path::DEFAULT_CONFIG_FILE;
use crate::output::print_json;
use anyhow::{bail, Context};
use clap::Subcommand;
use kavach_core::config::{EngineConfig, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective engine configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write the default configuration to kavach.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config: EngineConfig, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(&config, json),
        ConfigSubcommand::Validate => validate(&config, json),
        ConfigSubcommand::Init { force } => init(Path::new(DEFAULT_CONFIG_FILE), force),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config: &EngineConfig, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(config);
    }
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: &EngineConfig, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&serde_json::json!({
            "valid": errors == 0,
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!("Config is valid.");
    } else {
        for w in &warnings {
            let tag = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("{tag}: {}", w.message);
        }
    }

    if errors > 0 {
        bail!("config has {errors} error(s)");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    EngineConfig::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
