//! A builder interface for the logger.

use std::sync::Arc;
use termcolor::ColorChoice;

use crate::logger::Logger;
use crate::provider::stdout::StdoutProvider;
use crate::target::OutputTarget;

/// Constructs a [`Logger`] with a configured [`StdoutProvider`]. Unlike [`Logger::new()`], which
/// always writes to STDOUT, the builder falls back to the `TIMING_LOG` environment variable when
/// no output target was set explicitly.
#[derive(Debug)]
pub struct LoggerBuilder {
    prefix: String,
    /// Whether the logger starts out enabled.
    enabled: bool,
    /// An explicitly set output target. If this is `None`, then the `TIMING_LOG` environment
    /// variable decides.
    output_target: Option<OutputTarget>,
    /// An explicitly set color choice. If this is `None`, then this is detected from the
    /// environment and the chosen stream.
    color_choice: Option<ColorChoice>,
}

impl LoggerBuilder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            enabled: false,
            output_target: None,
            color_choice: None,
        }
    }

    /// Build the logger with logging already enabled or disabled. Loggers are disabled by default.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Explicitly set the output target, overriding the `TIMING_LOG` environment variable.
    pub fn with_output_target(mut self, target: OutputTarget) -> Self {
        self.output_target = Some(target);
        self
    }

    /// Explicitly set whether to use colors, overriding the `CLICOLOR`, `CLICOLOR_FORCE`, and
    /// `NO_COLOR` environment variables.
    pub fn with_color(mut self, color_choice: ColorChoice) -> Self {
        self.color_choice = Some(color_choice);
        self
    }

    pub fn build(self) -> Logger {
        // Picking an output target happens in two steps:
        // - If `LoggerBuilder::with_output_target()` was called, that target is used.
        // - Otherwise the `TIMING_LOG` environment variable is parsed, defaulting to STDOUT.
        let output_target = self
            .output_target
            .unwrap_or_else(OutputTarget::default_from_environment);
        let color_choice = self
            .color_choice
            .unwrap_or_else(|| output_target.color_support());

        let provider = StdoutProvider::for_target(self.prefix, output_target, color_choice);

        Logger::from_parts(Arc::new(provider), self.enabled)
    }
}
