use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use terminal_breakout::app::play_in_terminal;
use terminal_breakout::breakout::config::RoundConfig;
use terminal_breakout::breakout::mechanics::{GameResult, RoundEnd};
use terminal_breakout::util::init_logging;

/// Breakout in the terminal. Arrow keys move, enter starts, p pauses, escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// width of platform
    #[arg(long, default_value_t = 16)]
    platform_width: i32,
    /// number of characters platform shifts per move
    #[arg(long, default_value_t = 6)]
    platform_step: i32,
    /// speed of projectile
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
    /// rows in grid of breakable blocks
    #[arg(long, default_value_t = 6)]
    rows: i32,
    /// columns in grid of breakable blocks
    #[arg(long, default_value_t = 20)]
    cols: i32,
    /// width of each breakable block
    #[arg(long, default_value_t = 4)]
    block_width: i32,
    /// height of each breakable block
    #[arg(long, default_value_t = 1)]
    block_height: i32,
    /// horizontal gap between blocks
    #[arg(long, default_value_t = 1)]
    margin_x: i32,
    /// vertical gap between blocks
    #[arg(long, default_value_t = 0)]
    margin_y: i32,
    /// write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn round_config(&self) -> RoundConfig {
        RoundConfig {
            paddle_width: self.platform_width,
            paddle_step: self.platform_step,
            projectile_speed: self.speed,
            grid_rows: self.rows,
            grid_cols: self.cols,
            block_width: self.block_width,
            block_height: self.block_height,
            block_margin_x: self.margin_x,
            block_margin_y: self.margin_y,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.round_config();
    config.validate()?;

    match play_in_terminal(&config)? {
        RoundEnd::Finished(GameResult::Won) => println!("YOU WIN"),
        RoundEnd::Finished(GameResult::Lost) => println!("LOSER"),
        RoundEnd::Quit => {}
    }
    Ok(())
}
