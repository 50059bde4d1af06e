use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use smarthome_adapter_console::ConsoleSink;
use smarthome_demo::config::Config;
use smarthome_demo::{logging, scenario};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smarthome-demo: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init(&config.logging.filter);
    let clock = config.scenario.clock()?;
    tracing::info!(%clock, "starting scenario");

    let console = Arc::new(ConsoleSink::stdout());
    scenario::run(clock, &console).context("running scenario")?;
    console.finish().context("writing transcript")?;
    Ok(())
}
