//! A provider that hands messages over to the [`log`] facade.

use log::Level;
use std::fmt;

use super::Provider;

/// Forwards messages to whatever logger was installed through [`log::set_logger()`]. Errors are
/// logged at [`Level::Error`] and debug messages at [`Level::Debug`], both using the configured
/// target so they can be filtered by the host application's logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCrateProvider {
    target: String,
}

impl Default for LogCrateProvider {
    fn default() -> Self {
        Self::new(module_path!())
    }
}

impl LogCrateProvider {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The target passed along with every record.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Provider for LogCrateProvider {
    fn error(&self, args: fmt::Arguments<'_>) {
        log::log!(target: self.target.as_str(), Level::Error, "{}", args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        log::log!(target: self.target.as_str(), Level::Debug, "{}", args);
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;

    use super::*;

    struct CaptureLog {
        records: Mutex<Vec<(Level, String, String)>>,
    }

    impl Log for CaptureLog {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_owned(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLog = CaptureLog {
        records: Mutex::new(Vec::new()),
    };

    #[test]
    fn forwards_to_the_global_logger() {
        log::set_logger(&CAPTURE).expect("no other test installs a global logger");
        log::set_max_level(LevelFilter::Trace);

        let provider = LogCrateProvider::new("timing::clock");
        provider.error(format_args!("drift of {}ms", 12));
        provider.debug(format_args!("calibrated"));

        let records = CAPTURE.records.lock().unwrap();
        assert_eq!(
            *records,
            vec![
                (
                    Level::Error,
                    String::from("timing::clock"),
                    String::from("drift of 12ms")
                ),
                (
                    Level::Debug,
                    String::from("timing::clock"),
                    String::from("calibrated")
                ),
            ]
        );
    }

    #[test]
    fn default_target_is_the_module_path() {
        assert_eq!(
            LogCrateProvider::default().target(),
            "timing_log::provider::log_crate"
        );
    }
}
