/// tri3d - rotating triangle through a software MVP pipeline
///
/// Usage:
///   tri3d                      interactive, rotate about Z
///   tri3d <mode>               interactive, rotate about (1, 0, 1)
///   tri3d <mode> <angle>       render once to output.png
///   tri3d <mode> <angle> <f>   render once to <f>
/// Controls:
///   - A / D: Rotate by +/- 10 degrees
///   - ESC: Quit
use std::env;

use anyhow::Context;
use tri3d_viewer::{cli, CliError, FileSink, FrameController, RunMode, TerminalSink, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    let mode = match cli::parse_args(&args, config.axis, &config.output) {
        Ok(mode) => mode,
        Err(err @ CliError::TooManyArguments(_)) => {
            // Exit 0 and write nothing, as earlier releases did.
            log::warn!("{err}; nothing to do");
            return Ok(());
        }
        Err(err) => return Err(err).context(cli::USAGE),
    };

    match mode {
        RunMode::SingleShot { .. } => {
            let mut controller = FrameController::new(&config, mode, FileSink)?;
            controller.run().context("failed to render frame")?;
        }
        RunMode::InteractiveFixedAxis | RunMode::InteractiveArbitraryAxis { .. } => {
            let sink = TerminalSink::new().context("failed to set up the terminal")?;
            let mut controller = FrameController::new(&config, mode, sink)?;
            controller.run()?;
            log::info!("stopped after {} frames", controller.frame_count());
        }
    }

    Ok(())
}
