use anyhow::{anyhow, Context, Result};
use clap::Parser;

use keynav::cli::{CliArgs, RunConfig, RunMode};
use keynav::config::NavConfig;
use keynav::engine::Engine;
use keynav::keymap::{embedded_specs, load_default_keymap, load_overrides_file, merge_overrides};
use keynav::keymap::{CommandSpec, Registry};
use keynav::replay::{self, Fixture, ReplayHost};

fn load_specs(config: &RunConfig) -> Result<Vec<CommandSpec>> {
    match &config.keymap_path {
        Some(path) => {
            let overrides = load_overrides_file(path)
                .with_context(|| format!("Failed to load keymap {}", path.display()))?;
            Ok(merge_overrides(embedded_specs(), overrides))
        }
        None => Ok(load_default_keymap()),
    }
}

fn print_shortcuts(registry: &Registry) {
    for row in registry.help_rows() {
        println!("{:<14} {:<28} {}", row.keys, row.command, row.description);
    }
    for conflict in registry.conflicts() {
        println!(
            "note: {} fires {} together",
            conflict.chord,
            conflict.commands.join(" + ")
        );
    }
}

fn main() -> Result<()> {
    keynav::tracing::init();

    let config = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    let nav_config = match &config.config_path {
        Some(path) => NavConfig::load_from(path),
        None => NavConfig::load(),
    };
    let mut engine = Engine::new(nav_config, load_specs(&config)?);

    match &config.mode {
        RunMode::ListKeys => print_shortcuts(engine.registry()),
        RunMode::Replay { fixture, script } => {
            let steps = replay::parse_script(script)?;
            let mut host = ReplayHost::new(Fixture::load(fixture)?);
            tracing::info!("Replaying {} steps against {}", steps.len(), fixture.display());

            for report in replay::run(&mut engine, &mut host, &steps) {
                println!("{}", report);
            }
        }
    }

    Ok(())
}
