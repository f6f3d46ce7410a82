use crate::config::AppConfig;
use color_eyre::Result;
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::OpenOptions;

pub const fn level_for(config: &AppConfig) -> LevelFilter {
    if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. The terminal UI owns the screen, so it logs to a file.
pub fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(level_for(config)).parse_default_env();

    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    } else {
        builder.target(Target::Stderr);
    }

    builder.try_init()?;
    Ok(())
}
