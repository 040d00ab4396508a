//! Binary entry point: loads configuration, wires up the renderers, the
//! transport and the control channel, then runs the frame loop until quit.

mod app;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{info, warn};

use app::{spawn_control_thread, App, Command};
use fieldlab_config::{load_config, Mode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Mode to start in (gauss-e, gauss-b, faraday, ampere, wave)
    #[arg(short, long, default_value = "gauss-e")]
    mode: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", args.config.display());
            process::exit(1);
        }
    };

    let Some(initial_mode) = Mode::parse(&args.mode) else {
        eprintln!("Unknown mode '{}'", args.mode);
        process::exit(1);
    };

    info!(
        "Starting field lab: mode '{}' at {} FPS, surfaces {}x{}",
        initial_mode, config.framerate, config.surface.width, config.surface.height
    );

    // Control channel: stdin commands and Ctrl+C both feed the same queue
    let (tx, rx) = crossbeam_channel::unbounded();
    let ctrl_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = ctrl_tx.send(Command::Quit);
    }) {
        warn!("Could not install Ctrl+C handler: {e}");
    }
    spawn_control_thread(tx);

    let mut app = App::new(&config, initial_mode);
    app.run(&rx);

    info!("Session finished");
}
