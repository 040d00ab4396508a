//! Wall-clock session timer: a once-per-second counter that lives for the
//! whole module visit, fully independent of the animation clock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Counts whole seconds since `start`. Stopped and discarded on module
/// exit; never read by the formula set or the renderers.
pub struct SessionTimer {
    seconds: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    pub fn start() -> Self {
        let seconds = Arc::new(AtomicU64::new(0));
        let stop = Arc::new(AtomicBool::new(false));
        let tick_seconds = seconds.clone();
        let tick_stop = stop.clone();
        // Tick in 100ms slices so stop() is prompt
        let handle = thread::spawn(move || {
            let mut slices = 0u32;
            loop {
                thread::sleep(Duration::from_millis(100));
                if tick_stop.load(Ordering::SeqCst) {
                    return;
                }
                slices += 1;
                if slices == 10 {
                    slices = 0;
                    tick_seconds.fetch_add(1, Ordering::SeqCst);
                }
            }
        });
        Self {
            seconds,
            stop,
            handle: Some(handle),
        }
    }

    /// Whole seconds elapsed since start. Monotonic.
    pub fn elapsed_seconds(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }

    /// Stops the ticking thread and waits for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_whole_seconds() {
        let timer = SessionTimer::start();
        assert_eq!(timer.elapsed_seconds(), 0);
        thread::sleep(Duration::from_millis(1150));
        assert!(timer.elapsed_seconds() >= 1);
    }

    #[test]
    fn stop_halts_the_counter() {
        let mut timer = SessionTimer::start();
        timer.stop();
        let frozen = timer.elapsed_seconds();
        thread::sleep(Duration::from_millis(250));
        assert_eq!(timer.elapsed_seconds(), frozen);
    }
}
