//! The logger itself.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::provider::stdout::StdoutProvider;
use crate::provider::Provider;
use crate::target::{OutputTarget, OutputTargetImpl};

/// Routes debug and error messages to a [`Provider`] while logging is enabled. Logging starts out
/// disabled. Use [`LoggerBuilder`][crate::LoggerBuilder] for more control over the default
/// provider.
///
/// The [`debug!()`][crate::debug!()] and [`error!()`][crate::error!()] macros are the most
/// convenient way to log, since they skip evaluating their arguments while logging is disabled.
pub struct Logger {
    /// The active provider. Logging only holds the read lock long enough to clone the `Arc`, so
    /// swapping never waits for a provider call to finish.
    provider: RwLock<Arc<dyn Provider>>,
    /// Whether messages are forwarded to the provider.
    enabled: AtomicBool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("provider", &"<dyn Provider>")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Logger {
    /// Create a disabled logger that writes to STDOUT through a [`StdoutProvider`] with the given
    /// prefix once enabled.
    ///
    /// Timestamps are in local time only if the local offset could be determined when the first
    /// provider was created. Call [`init_local_offset()`][crate::init_local_offset()] early in
    /// `main()` if loggers are created after other threads have been spawned.
    pub fn new(prefix: impl Into<String>) -> Self {
        let target = OutputTarget::Stdout;
        Self::with_default_provider(prefix, OutputTargetImpl::new(target, target.color_support()))
    }

    /// Create a disabled logger with a [`StdoutProvider`] writing to `target`.
    pub(crate) fn with_default_provider(
        prefix: impl Into<String>,
        target: OutputTargetImpl,
    ) -> Self {
        Self::from_parts(Arc::new(StdoutProvider::from_impl(prefix, target)), false)
    }

    pub(crate) fn from_parts(provider: Arc<dyn Provider>, enabled: bool) -> Self {
        Self {
            provider: RwLock::new(provider),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Enable or disable logging. Takes effect immediately for every thread using this logger.
    #[inline]
    pub fn set_mode(&self, enable: bool) {
        self.enabled.store(enable, Ordering::Release);
    }

    /// Whether logging is currently enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Replace the provider. Passing `None` leaves the current provider in place. This is safe to
    /// call while other threads are logging, including from inside a provider. Messages already
    /// being handled finish on the old provider.
    pub fn set_provider(&self, provider: Option<Arc<dyn Provider>>) {
        if let Some(provider) = provider {
            *self.provider.write() = provider;
        }
    }

    /// The currently installed provider.
    pub fn provider(&self) -> Arc<dyn Provider> {
        Arc::clone(&self.provider.read())
    }

    /// Forward a debug message to the provider if logging is enabled. Providers may log through
    /// the same logger again.
    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled() {
            self.provider().debug(args);
        }
    }

    /// Forward an error message to the provider if logging is enabled. See [`Logger::debug()`].
    #[inline]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled() {
            self.provider().error(args);
        }
    }
}
