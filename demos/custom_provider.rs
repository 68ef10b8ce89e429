use std::fmt;
use std::sync::Arc;

use timing_log::{LogCrateProvider, Logger, Provider};

/// Only prints errors, and prints them without a timestamp.
struct ErrorsOnly;

impl Provider for ErrorsOnly {
    fn error(&self, args: fmt::Arguments<'_>) {
        eprintln!("timing error: {args}");
    }

    fn debug(&self, _args: fmt::Arguments<'_>) {}
}

fn main() {
    let logger = Logger::new("");
    logger.set_mode(true);

    logger.set_provider(Some(Arc::new(ErrorsOnly)));
    timing_log::debug!(logger, "Dropped by the provider");
    timing_log::error!(logger, "Printed by the provider");

    // Without a `log` backend installed these messages go nowhere. An application that sets up
    // something like `env_logger` would receive them under the `timing` target.
    logger.set_provider(Some(Arc::new(LogCrateProvider::new("timing"))));
    timing_log::error!(logger, "Forwarded to the log crate");
}
