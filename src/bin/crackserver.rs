//! `crackserver` entry point (spec.md §6).

use std::sync::Arc;

use log::error;

use crackserver::admission::AdmissionController;
use crackserver::config::{self, ServerConfig};
use crackserver::dictionary::Dictionary;
use crackserver::errors::Error;
use crackserver::listener;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match config::parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = run(config).await {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(config: ServerConfig) -> Result<(), Error> {
    let dictionary = Dictionary::load(&config.dictionary_path)?;
    let admission = Arc::new(AdmissionController::new(config.max_connections));

    listener::serve(&config.port, dictionary, admission).await
}
