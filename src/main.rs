use StoichCalc::cli::cli_main::run_interactive_menu;
use StoichCalc::logger::init_logger;
use StoichCalc::settings::{DEFAULT_CONFIG_FILE, Settings};
use log::{error, info, warn};

pub fn main() {
    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    // the logger is configured by the settings, so a load failure is reported once it runs
    let (settings, load_error) = match Settings::try_load(&config_file) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    if let Err(e) = init_logger(&settings) {
        eprintln!("failed to start logging: {}", e);
    }
    match load_error {
        Some(e) => warn!(
            "failed to read settings from {}: {}, using defaults",
            config_file, e
        ),
        None => info!("settings loaded from {}", config_file),
    }
    let table = match settings.load_table() {
        Ok(table) => table,
        Err(e) => {
            error!("cannot load periodic table: {}", e);
            std::process::exit(1);
        }
    };
    run_interactive_menu(&table);
}
