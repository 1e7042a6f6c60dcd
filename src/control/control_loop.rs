//! Periodic control loop thread

use super::{CommandSink, ControlStack};
use log::{error, info};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Ticks a shared control stack on a background thread until stopped or dropped
pub struct ControlLoop {
    running: Arc<Mutex<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl ControlLoop {
    /// Start ticking `stack` every `period`, publishing to `sink`
    pub fn spawn<S>(stack: Arc<Mutex<ControlStack>>, sink: S, period: Duration) -> Self
    where
        S: CommandSink + Send + 'static,
    {
        let running = Arc::new(Mutex::new(true));
        let running_clone = Arc::clone(&running);

        let handle = thread::spawn(move || {
            while running_clone.lock().map(|r| *r).unwrap_or(false) {
                tick_once(&stack, &sink);
                thread::sleep(period);
            }
        });

        ControlLoop {
            running,
            handle: Some(handle),
        }
    }

    /// Clear the running flag and wait for the thread to exit
    pub fn stop(&mut self) {
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Control loop thread panicked");
            } else {
                info!("Control loop stopped");
            }
        }
    }
}

impl Drop for ControlLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick_once<S: CommandSink>(stack: &Mutex<ControlStack>, sink: &S) {
    let mut stack = match stack.lock() {
        Ok(stack) => stack,
        Err(_) => {
            error!("Control stack lock poisoned, skipping tick");
            return;
        }
    };

    if let Err(e) = stack.tick(sink) {
        error!("{}", e);
    }
}
