//! GridDuel - Turn-Based Tactical Grid Combat
//!
//! Binary entry point. Replays scripted matches in headless mode; the
//! engine's graphical front ends are external presentation adapters that
//! consume the library.

use tracing_subscriber::EnvFilter;

use gridduel::cli;
use gridduel::headless::{run_headless_match, HeadlessMatchConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = cli::parse_args();

    let Some(config_path) = args.headless else {
        eprintln!("GridDuel runs scripted matches headlessly; pass --headless <CONFIG_FILE>.");
        eprintln!("Graphical play is provided by external presentation adapters.");
        std::process::exit(2);
    };

    let mut config = match HeadlessMatchConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(output) = args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }

    if let Err(e) = run_headless_match(config) {
        eprintln!("Error running match: {}", e);
        std::process::exit(1);
    }
}
