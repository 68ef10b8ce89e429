//! A small logging façade for timing code. A [`Logger`] forwards debug and error messages to a
//! swappable [`Provider`], but only while logging has been switched on with
//! [`Logger::set_mode()`]. Logging is off by default so the disabled path costs a single atomic
//! load.
//!
//! ```
//! let logger = timing_log::Logger::new("timer ");
//! logger.set_mode(true);
//! timing_log::debug!(logger, "tick took {}us", 42);
//! ```

mod builder;
mod logger;
mod provider;
mod target;

pub use builder::LoggerBuilder;
pub use logger::Logger;
pub use provider::log_crate::LogCrateProvider;
pub use provider::stdout::{init_local_offset, StdoutProvider};
pub use provider::Provider;
pub use target::{OutputTarget, ParseOutputTargetError};

pub use termcolor::ColorChoice;

/// Log a debug message through a [`Logger`]. The arguments follow [`format!()`]'s syntax and are
/// only evaluated when logging is enabled.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        if logger.is_enabled() {
            logger.debug(::std::format_args!($($arg)+));
        }
    }};
}

/// Log an error message through a [`Logger`]. The arguments follow [`format!()`]'s syntax and are
/// only evaluated when logging is enabled.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        if logger.is_enabled() {
            logger.error(::std::format_args!($($arg)+));
        }
    }};
}
