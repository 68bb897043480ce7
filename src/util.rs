use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// The terminal belongs to the game, so records go to `log_file`.
/// Without a file logging stays off unless `RUST_LOG` asks for it.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::builder();
    builder
        .format_target(false)
        .format_timestamp_secs();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder
                .filter_level(LevelFilter::Off)
                .parse_default_env();
        }
    }
    builder.try_init()?;
    Ok(())
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    let _ = env_logger::builder()
        .format_timestamp_secs()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}
