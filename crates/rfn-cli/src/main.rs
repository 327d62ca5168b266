use rfn_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging if possible; stdout stays reserved for the resolved name.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("rfn error: {:#}", err);
        std::process::exit(1);
    }
}
