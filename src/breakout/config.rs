use std::time::Duration;

use crate::breakout::error::BreakoutError;

/// One simulation tick: 30 per second
pub const TICK_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / 30);
/// How long the final message stays on screen
pub const FINISH_HOLD: Duration = Duration::from_secs(3);

/// Everything needed to set up a round
#[derive(Clone, Debug, PartialEq)]
pub struct RoundConfig {
    pub paddle_width: i32,
    /// cells the paddle shifts per move
    pub paddle_step: i32,
    pub projectile_speed: f64,
    pub grid_rows: i32,
    pub grid_cols: i32,
    pub block_width: i32,
    pub block_height: i32,
    pub block_margin_x: i32,
    pub block_margin_y: i32,
    pub tick_period: Duration,
    pub finish_hold: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            paddle_width: 16,
            paddle_step: 6,
            projectile_speed: 1.0,
            grid_rows: 6,
            grid_cols: 20,
            block_width: 4,
            block_height: 1,
            block_margin_x: 1,
            block_margin_y: 0,
            tick_period: TICK_PERIOD,
            finish_hold: FINISH_HOLD,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), BreakoutError> {
        fn positive(name: &str, value: i32) -> Result<(), BreakoutError> {
            match value > 0 {
                true => Ok(()),
                false => Err(BreakoutError::InvalidConfig(format!("{name} must be positive, got {value}"))),
            }
        }
        fn not_negative(name: &str, value: i32) -> Result<(), BreakoutError> {
            match value >= 0 {
                true => Ok(()),
                false => Err(BreakoutError::InvalidConfig(format!("{name} must not be negative, got {value}"))),
            }
        }

        positive("paddle width", self.paddle_width)?;
        positive("paddle step", self.paddle_step)?;
        positive("grid rows", self.grid_rows)?;
        positive("grid columns", self.grid_cols)?;
        positive("block width", self.block_width)?;
        positive("block height", self.block_height)?;
        not_negative("horizontal block margin", self.block_margin_x)?;
        not_negative("vertical block margin", self.block_margin_y)?;
        if !(self.projectile_speed.is_finite() && self.projectile_speed > 0.0) {
            return Err(BreakoutError::InvalidConfig(format!(
                "projectile speed must be positive, got {}",
                self.projectile_speed
            )));
        }
        Ok(())
    }
}
