//! The backends a [`Logger`][crate::Logger] can forward its messages to.

use std::fmt;
use std::sync::Arc;

pub mod log_crate;
pub mod stdout;

/// Something that can receive debug and error messages from a [`Logger`][crate::Logger]. The
/// message arrives unformatted as [`fmt::Arguments`], so the provider decides whether and how to
/// format it.
///
/// # Notes
///
/// Providers should never fail or panic. Any errors from the underlying sink need to be swallowed
/// so logging can't take down the code that's being logged.
pub trait Provider: Send + Sync {
    /// Handle an error message.
    fn error(&self, args: fmt::Arguments<'_>);
    /// Handle a debug message.
    fn debug(&self, args: fmt::Arguments<'_>);
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        (**self).debug(args)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        (**self).debug(args)
    }
}
