//! The frame loop and its control surface. Commands arrive on a channel
//! (from stdin or Ctrl+C) and are drained between frames, so edits always
//! take effect on the next frame.

use std::io::{self, BufRead};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender as ChannelSender, TryRecvError};
use log::{debug, info, warn};

use fieldlab_config::{Config, Mode};
use fieldlab_core::{Lifecycle, SessionTimer};
use fieldlab_simulation::{readout, renderers};
use fieldlab_transport::progress::{
    FileProgressStore, NullProgressStore, ProgressStore, ProgressTracker, StatusBanner, StatusKind,
};
use fieldlab_transport::{
    create_sender, create_serializer, FrameSnapshot, Sender, Serializer,
};

/// A control command for the running application.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectMode(Mode),
    Set { key: String, value: f64 },
    Save,
    Quit,
}

/// Parses a line of control input. Empty lines and comments yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "mode" => Mode::parse(parts.next()?).map(Command::SelectMode),
        "set" => {
            let key = parts.next()?.to_string();
            let value = parts.next()?.parse().ok()?;
            Some(Command::Set { key, value })
        }
        "save" => Some(Command::Save),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Blanks and `#` comments parse to nothing by design and deserve no warning.
fn is_silent(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Reads control commands from stdin until EOF or quit.
pub fn spawn_control_thread(tx: ChannelSender<Command>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(cmd) => {
                    let quit = cmd == Command::Quit;
                    if tx.send(cmd).is_err() || quit {
                        break;
                    }
                }
                None if is_silent(&line) => {}
                None => warn!("Ignoring unrecognized command: '{}'", line.trim()),
            }
        }
    });
}

pub struct App {
    lifecycle: Lifecycle,
    session: SessionTimer,
    tracker: ProgressTracker,
    banner: StatusBanner,
    serializer: Box<dyn Serializer>,
    sender: Box<dyn Sender>,
    output_frequency: u32,
    frame_duration: Duration,
    frame_count: u64,
}

impl App {
    pub fn new(config: &Config, initial_mode: Mode) -> Self {
        let mut lifecycle = Lifecycle::new(
            renderers(),
            config.parameters.clamped(),
            initial_mode,
            config.surface.height,
        );
        // Every tab gets a surface up front; attaching the active one
        // fires the deferred animation start.
        for mode in Mode::ALL {
            lifecycle.attach_surface(mode, config.surface.width);
        }

        let store: Box<dyn ProgressStore> = match &config.session.progress_path {
            Some(path) => Box::new(FileProgressStore::new(path)),
            None => Box::new(NullProgressStore),
        };
        let tracker = ProgressTracker::new(store, config.session.guest, config.session.module_id);

        Self {
            lifecycle,
            session: SessionTimer::start(),
            tracker,
            banner: StatusBanner::new(),
            serializer: create_serializer(config.transport.serializer),
            sender: create_sender(config.transport.sender),
            output_frequency: config.transport.output_frequency.max(1),
            frame_duration: Duration::from_secs_f64(1.0 / config.framerate as f64),
            frame_count: 0,
        }
    }

    /// Runs the frame loop until a quit command arrives.
    pub fn run(&mut self, rx: &Receiver<Command>) {
        let mut banner_visible = false;
        loop {
            let frame_start = Instant::now();

            loop {
                match rx.try_recv() {
                    Ok(cmd) => {
                        if !self.handle(cmd) {
                            self.shutdown();
                            return;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.shutdown();
                        return;
                    }
                }
            }

            if self.lifecycle.frame() {
                self.frame_count += 1;
                if self.frame_count % self.output_frequency as u64 == 0 {
                    self.emit_snapshot();
                }
            }

            let showing = self.banner.current().is_some();
            if banner_visible && !showing {
                debug!("Save status expired");
            }
            banner_visible = showing;

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_duration {
                spin_sleep::sleep(self.frame_duration - elapsed);
            } else {
                warn!(
                    "Frame took {:?}, budget is {:?}",
                    elapsed, self.frame_duration
                );
            }
        }
    }

    /// Applies one command. Returns false when the loop should stop.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::SelectMode(mode) => self.lifecycle.select_mode(mode),
            Command::Set { key, value } => {
                let mut params = *self.lifecycle.params();
                match params.apply(self.lifecycle.active_mode(), &key, value) {
                    Ok(stored) => {
                        info!("Parameter '{}' set to {}", key, stored);
                        self.lifecycle.set_parameters(params);
                    }
                    Err(e) => warn!("Parameter update rejected: {e}"),
                }
            }
            Command::Save => {
                let status = self
                    .tracker
                    .save(self.lifecycle.active_mode(), self.session.elapsed_seconds());
                match status.kind {
                    StatusKind::Error => warn!("{}", status.message),
                    _ => info!("{}", status.message),
                }
                self.banner.show(status);
            }
            Command::Quit => return false,
        }
        true
    }

    fn emit_snapshot(&mut self) {
        let mode = self.lifecycle.active_mode();
        let time = self.lifecycle.phase();
        let snapshot = FrameSnapshot {
            mode,
            frame: self.frame_count,
            time,
            readout: readout(mode, self.lifecycle.params(), time),
        };
        match self.serializer.serialize(&snapshot) {
            Ok(data) => {
                if let Err(e) = self.sender.send(data.as_bytes()) {
                    warn!("Snapshot delivery failed: {e}");
                }
            }
            Err(e) => warn!("Snapshot serialization failed: {e}"),
        }
    }

    fn shutdown(&mut self) {
        // One last checkpoint so the session time is not lost on exit.
        let status = self
            .tracker
            .save(self.lifecycle.active_mode(), self.session.elapsed_seconds());
        if status.kind == StatusKind::Error {
            warn!("{}", status.message);
        }
        self.lifecycle.shutdown();
        self.session.stop();
        info!(
            "Shut down after {} frames, {} seconds",
            self.frame_count,
            self.session.elapsed_seconds()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlab_config::Config;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.transport.sender = fieldlab_config::SenderType::Null;
        config.session.guest = true;
        config
    }

    #[test]
    fn parse_command_recognizes_the_grammar() {
        assert_eq!(
            parse_command("mode faraday"),
            Some(Command::SelectMode(Mode::Faraday))
        );
        assert_eq!(
            parse_command("  set charge 7.5 "),
            Some(Command::Set { key: "charge".into(), value: 7.5 })
        );
        assert_eq!(parse_command("save"), Some(Command::Save));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("# a comment"), None);
        assert_eq!(parse_command("mode warp"), None);
        assert_eq!(parse_command("set charge abc"), None);
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn blanks_and_comments_stay_silent() {
        assert!(is_silent(""));
        assert!(is_silent("   "));
        assert!(is_silent("# switch modes below"));
        assert!(is_silent("  # indented comment"));
        assert!(!is_silent("dance"));
        assert!(!is_silent("mode warp"));
    }

    #[test]
    fn select_mode_switches_the_active_renderer() {
        let mut app = App::new(&quiet_config(), Mode::GaussE);
        assert!(app.handle(Command::SelectMode(Mode::Wave)));
        assert_eq!(app.lifecycle.active_mode(), Mode::Wave);
    }

    #[test]
    fn set_updates_known_parameters_and_ignores_unknown_keys() {
        let mut app = App::new(&quiet_config(), Mode::GaussE);
        assert!(app.handle(Command::Set { key: "charge".into(), value: -3.0 }));
        assert_eq!(app.lifecycle.params().gauss_e.charge, -3.0);

        // Unknown keys for the active mode are rejected without state change
        assert!(app.handle(Command::Set { key: "frequency".into(), value: 2.0 }));
        assert_eq!(app.lifecycle.params().wave.frequency, 1.0);
    }

    #[test]
    fn frames_advance_after_construction() {
        let mut app = App::new(&quiet_config(), Mode::Ampere);
        let before = app.lifecycle.phase();
        assert!(app.lifecycle.frame());
        assert!(app.lifecycle.phase() > before);
    }

    #[test]
    fn quit_ends_the_command_stream() {
        let mut app = App::new(&quiet_config(), Mode::GaussE);
        assert!(!app.handle(Command::Quit));
    }

    #[test]
    fn guest_save_shows_an_info_banner() {
        let mut app = App::new(&quiet_config(), Mode::GaussB);
        assert!(app.handle(Command::Save));
        let status = app.banner.current().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
    }
}
