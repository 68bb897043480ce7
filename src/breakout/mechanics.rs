use std::f64::consts::FRAC_PI_4;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use console_engine::Color;
use rand::Rng;

use crate::breakout::algebra_2d::Velocity;
use crate::breakout::config::RoundConfig;
use crate::breakout::error::BreakoutError;
use crate::breakout::grid::{DestructibleGrid, GridLayout};
use crate::breakout::paddle::Paddle;
use crate::breakout::projectile::Projectile;
use crate::terminal::input::{CancelToken, InputEvent};
use crate::terminal::renderer::{Renderer, Style};

/// The ball starts moving up-right or up-left
const INITIAL_DIRECTIONS: [f64; 2] = [FRAC_PI_4, 3.0 * FRAC_PI_4];

/// Upper bound for blocking on the input channel before looking at the cancel flag
const CANCEL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

const TEXT_STYLE: Style = Style::foreground(Color::Rgb { r: 162, g: 59, b: 114 });
const START_INSTRUCTIONS: &str = "Press enter to begin.";
const QUIT_INSTRUCTIONS: &str = "Press escape to quit.";
const PAUSED_MESSAGE: &str = "PAUSED";
const WON_MESSAGE: &str = "YOU WIN";
const LOST_MESSAGE: &str = "LOSER";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Lost,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    WaitingToStart,
    Running,
    /// terminal
    Finished(GameResult),
}

/// How [GameLoop::run] ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    Finished(GameResult),
    Quit,
}

/// One round of breakout.
///
/// Owns the projectile, the grid and the round state. The paddle is moved only through
/// [InputEvent]s, which arrive over a channel and are applied between ticks.
pub struct GameLoop<R: Renderer> {
    renderer: R,
    paddle: Paddle,
    projectile: Projectile,
    grid: DestructibleGrid,
    state: RoundState,
    paused: bool,
    quit_requested: bool,
    tick_period: Duration,
    finish_hold: Duration,
    ticks: u64,
}

impl<R: Renderer> GameLoop<R> {
    /// Sets up paddle, projectile and grid for the current screen size.
    ///
    /// On failure the renderer is closed before the error is returned.
    pub fn new(mut renderer: R, config: &RoundConfig, rng: &mut impl Rng) -> Result<Self, BreakoutError> {
        match setup(config, renderer.size(), rng) {
            Ok((paddle, projectile, grid)) => Ok(
                Self::with_parts(renderer, paddle, projectile, grid)
                    .with_timing(config.tick_period, config.finish_hold)
            ),
            Err(e) => {
                log::warn!("round setup failed: {e}");
                renderer.close();
                Err(e)
            }
        }
    }

    pub fn with_parts(renderer: R, paddle: Paddle, projectile: Projectile, grid: DestructibleGrid) -> Self {
        let defaults = RoundConfig::default();
        Self {
            renderer,
            paddle,
            projectile,
            grid,
            state: RoundState::WaitingToStart,
            paused: false,
            quit_requested: false,
            tick_period: defaults.tick_period,
            finish_hold: defaults.finish_hold,
            ticks: 0,
        }
    }

    pub fn with_timing(mut self, tick_period: Duration, finish_hold: Duration) -> Self {
        self.tick_period = tick_period;
        self.finish_hold = finish_hold;
        self
    }

    pub fn state(&self) -> RoundState { self.state }
    pub fn ticks(&self) -> u64 { self.ticks }
    pub fn is_paused(&self) -> bool { self.paused }
    pub fn paddle(&self) -> &Paddle { &self.paddle }
    pub fn projectile(&self) -> &Projectile { &self.projectile }
    pub fn projectile_mut(&mut self) -> &mut Projectile { &mut self.projectile }
    pub fn grid(&self) -> &DestructibleGrid { &self.grid }
    pub fn grid_mut(&mut self) -> &mut DestructibleGrid { &mut self.grid }

    /// Plays the round to its end: wait for the start signal, tick at a fixed rate, show the result.
    /// The renderer is closed before returning.
    pub fn run(&mut self, events: &Receiver<InputEvent>, cancel: &CancelToken) -> RoundEnd {
        let end = match self.wait_for_start(events, cancel) {
            false => RoundEnd::Quit,
            true => match self.run_ticks(events, cancel) {
                None => RoundEnd::Quit,
                Some(result) => {
                    self.show_result(result, events);
                    RoundEnd::Finished(result)
                }
            },
        };
        if end == RoundEnd::Quit {
            log::info!("round aborted after {} ticks", self.ticks);
        }
        self.renderer.close();
        end
    }

    /// Returns false when the round was aborted while waiting
    fn wait_for_start(&mut self, events: &Receiver<InputEvent>, cancel: &CancelToken) -> bool {
        self.draw_playfield();
        self.draw_overlay();
        self.renderer.present();

        while self.state == RoundState::WaitingToStart {
            if cancel.is_cancelled() {
                return false;
            }
            match events.recv_timeout(CANCEL_CHECK_INTERVAL) {
                Ok(event) => self.handle(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => self.quit_requested = true,
            }
            if self.quit_requested {
                return false;
            }
        }
        true
    }

    /// Returns None when the round was aborted
    fn run_ticks(&mut self, events: &Receiver<InputEvent>, cancel: &CancelToken) -> Option<GameResult> {
        loop {
            let tick_start = Instant::now();
            self.drain_events(events);
            if self.quit_requested || cancel.is_cancelled() {
                return None;
            }
            if let RoundState::Finished(result) = self.time_step() {
                return Some(result);
            }
            if let Some(rest) = self.tick_period.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    fn drain_events(&mut self, events: &Receiver<InputEvent>) {
        loop {
            match events.try_recv() {
                Ok(event) => self.handle(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.quit_requested = true;
                    break;
                }
            }
        }
    }

    /// Applies one player input
    pub fn handle(&mut self, event: InputEvent) {
        let finished = matches!(self.state, RoundState::Finished(_));
        match event {
            InputEvent::MoveLeft if !finished && !self.paused => {
                self.paddle.move_left(&mut self.renderer)
            }
            InputEvent::MoveRight if !finished && !self.paused => {
                self.paddle.move_right(&mut self.renderer)
            }
            InputEvent::MoveLeft | InputEvent::MoveRight => {}
            InputEvent::Confirm => {
                if self.state == RoundState::WaitingToStart {
                    self.start();
                }
            }
            InputEvent::Quit => {
                log::debug!("quit requested");
                self.quit_requested = true;
            }
            InputEvent::Resize => self.resync(),
            InputEvent::Pause => {
                if self.state == RoundState::Running {
                    self.toggle_pause();
                }
            }
        }
    }

    fn start(&mut self) {
        self.erase_overlay();
        self.draw_playfield();
        self.renderer.present();
        self.state = RoundState::Running;
        log::info!("round started, {} blocks", self.grid.len());
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        match self.paused {
            true => self.draw_overlay(),
            false => {
                self.erase_overlay();
                self.draw_playfield();
            }
        }
        self.renderer.present();
        log::debug!("paused: {}", self.paused);
    }

    fn resync(&mut self) {
        log::debug!("display resync");
        self.renderer.sync();
        self.draw_playfield();
        self.draw_overlay();
        self.renderer.present();
    }

    /// One simulation step. Does nothing unless the round is running and not paused.
    pub fn time_step(&mut self) -> RoundState {
        if self.state != RoundState::Running || self.paused {
            return self.state;
        }
        self.ticks += 1;
        let (_, screen_h) = self.renderer.size();

        if let Some((row, col)) = self.grid.strike(&self.projectile.shape, &mut self.renderer) {
            self.projectile.velocity.reflect_vertical();
            log::debug!("tick {}: block ({row},{col}) destroyed, {} left", self.ticks, self.grid.remaining());
        }

        let mut lost = false;
        if self.projectile.collides_with(&self.paddle.shape) {
            self.projectile.velocity.reflect_vertical();
            log::debug!("tick {}: paddle hit", self.ticks);
        } else if self.projectile.shape.touches_bottom(screen_h) {
            lost = true;
        }

        self.projectile.update(&mut self.renderer);
        self.paddle.draw(&mut self.renderer);
        self.renderer.present();

        // a loss in this tick is final even if the last block went down too
        if lost {
            self.finish(GameResult::Lost);
        } else if self.grid.all_destroyed() {
            self.finish(GameResult::Won);
        }
        self.state
    }

    fn finish(&mut self, result: GameResult) {
        log::info!("round finished after {} ticks: {:?}", self.ticks, result);
        self.state = RoundState::Finished(result);
    }

    /// Shows the result message and holds it. Quit cuts the hold short.
    fn show_result(&mut self, result: GameResult, events: &Receiver<InputEvent>) {
        let message = match result {
            GameResult::Won => WON_MESSAGE,
            GameResult::Lost => LOST_MESSAGE,
        };
        self.print_centered(message, 0, TEXT_STYLE);
        self.renderer.present();

        let deadline = Instant::now() + self.finish_hold;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match events.recv_timeout(deadline - now) {
                Ok(InputEvent::Quit) => break,
                Ok(InputEvent::Resize) => {
                    self.renderer.sync();
                    self.print_centered(message, 0, TEXT_STYLE);
                    self.renderer.present();
                }
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn draw_playfield(&mut self) {
        self.grid.draw(&mut self.renderer);
        self.paddle.draw(&mut self.renderer);
        self.projectile.draw(&mut self.renderer);
    }

    /// Text over the playfield, depending on the state
    fn draw_overlay(&mut self) {
        match self.state {
            RoundState::WaitingToStart => {
                self.print_centered(START_INSTRUCTIONS, 0, TEXT_STYLE);
                self.print_centered(QUIT_INSTRUCTIONS, 1, TEXT_STYLE);
            }
            RoundState::Running if self.paused => self.print_centered(PAUSED_MESSAGE, 0, TEXT_STYLE),
            _ => {}
        }
    }

    fn erase_overlay(&mut self) {
        let blank = |text: &str| " ".repeat(text.chars().count());
        match self.state {
            RoundState::WaitingToStart => {
                self.print_centered(&blank(START_INSTRUCTIONS), 0, Style::default());
                self.print_centered(&blank(QUIT_INSTRUCTIONS), 1, Style::default());
            }
            RoundState::Running => self.print_centered(&blank(PAUSED_MESSAGE), 0, Style::default()),
            RoundState::Finished(_) => {}
        }
    }

    /// `line` counts from the vertical center
    fn print_centered(&mut self, text: &str, line: i32, style: Style) {
        let (screen_w, screen_h) = self.renderer.size();
        let x = screen_w / 2 - text.chars().count() as i32 / 2;
        self.renderer.print(x, screen_h / 2 + line, text, style);
    }
}

fn setup(
    config: &RoundConfig,
    (screen_w, screen_h): (i32, i32),
    rng: &mut impl Rng,
) -> Result<(Paddle, Projectile, DestructibleGrid), BreakoutError> {
    config.validate()?;
    if config.paddle_width > screen_w {
        return Err(BreakoutError::InvalidConfig(format!(
            "paddle width {} exceeds screen width {screen_w}",
            config.paddle_width
        )));
    }
    let grid = DestructibleGrid::new(&GridLayout::from(config), (screen_w, screen_h), rng)?;
    let direction = INITIAL_DIRECTIONS[rng.gen_range(0..INITIAL_DIRECTIONS.len())];
    let projectile = Projectile::new(screen_w, screen_h, Velocity::new(direction, config.projectile_speed));
    let paddle = Paddle::new(screen_w, screen_h, config.paddle_width, config.paddle_step);
    Ok((paddle, projectile, grid))
}
