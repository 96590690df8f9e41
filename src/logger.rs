/// Logger bootstrap for the StoichCalc binary: colored terminal output at the configured
/// level, duplicated into a log file when `Settings::log_file` is set.
use crate::settings::Settings;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

pub fn init_logger(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let level = settings.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &settings.log_file {
        loggers.push(WriteLogger::new(
            level,
            Config::default(),
            File::create(log_file)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
