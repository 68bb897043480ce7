use std::sync::mpsc;
use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use rand::Rng;

use crate::breakout::config::RoundConfig;
use crate::breakout::mechanics::{GameLoop, RoundEnd};
use crate::terminal::input::{spawn_input_thread, CancelToken, InputEvent};
use crate::terminal::renderer::{Renderer, TerminalRenderer};

/// Plays one round on the terminal.
///
/// The calling thread runs the simulation, a second thread reads the keyboard.
/// Both are stopped and the terminal is restored before this returns.
pub fn play_in_terminal(config: &RoundConfig) -> Result<RoundEnd> {
    let renderer = TerminalRenderer::init()?;
    let (sender, events) = mpsc::channel();
    let cancel = CancelToken::new();
    let input_thread = spawn_input_thread(sender, cancel.clone())
        .context("could not start the input thread")?;

    let end = run_round(renderer, config, &mut rand::thread_rng(), &events, &cancel);

    cancel.cancel();
    if input_thread.join().is_err() {
        log::warn!("input thread panicked");
    }
    end
}

/// Sets up a round on `renderer` and plays it with the given event source
pub fn run_round<R: Renderer>(
    renderer: R,
    config: &RoundConfig,
    rng: &mut impl Rng,
    events: &Receiver<InputEvent>,
    cancel: &CancelToken,
) -> Result<RoundEnd> {
    let mut game = GameLoop::new(renderer, config, rng)
        .context("could not set up the round")?;
    let end = game.run(events, cancel);
    log::info!("round ended: {:?}", end);
    Ok(end)
}
