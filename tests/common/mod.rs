use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use terminal_breakout::breakout::config::RoundConfig;
use terminal_breakout::terminal::input::{CancelToken, InputEvent};

/// No pacing, no hold at the end
pub fn quick_config() -> RoundConfig {
    RoundConfig {
        tick_period: Duration::ZERO,
        finish_hold: Duration::ZERO,
        ..Default::default()
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(4711)
}

/// Stands in for the keyboard thread: sends `script` (delay, event) and keeps the channel
/// open until `done` is cancelled.
pub fn scripted_input(script: Vec<(Duration, InputEvent)>, done: CancelToken) -> (Receiver<InputEvent>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel();
    let handle = thread::spawn(move || {
        for (delay, event) in script {
            thread::sleep(delay);
            if sender.send(event).is_err() {
                return;
            }
        }
        while !done.is_cancelled() {
            thread::sleep(Duration::from_millis(5));
        }
    });
    (receiver, handle)
}
