use clap::Parser;
use log::{debug, error};
use myredditbackup::cli::{Config, FAILURE_EXIT_CODE, Runner};
use myredditbackup::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(err) = logging::install(logging::logger(config.log_level())) {
        eprintln!("{err}");
    }

    match Runner::new(config).run().await {
        Ok(condition) => condition.into(),
        Err(err) => {
            error!("{err}");
            debug!("{err:?}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}
