//! The default provider, writing timestamped lines to STDOUT.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::Provider;
use crate::target::{OutputTarget, OutputTargetImpl};

/// Appended to a message when one of its arguments failed to format.
const FORMAT_ERROR_TOKEN: &str = "%!(FORMAT ERROR)";

/// `2024/01/31 13:37:00 `. The trailing space separates the timestamp from the prefix.
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second] ");

/// Determining the local offset is only sound while the process is single threaded on some
/// platforms, so this is resolved once when the first provider is created and UTC is used when that
/// fails.
static LOCAL_OFFSET: Lazy<UtcOffset> =
    Lazy::new(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));

/// Resolve and cache the local UTC offset used for timestamps, returning the offset that will be
/// used from now on.
///
/// The `time` crate refuses to look up the local offset on Unix-like systems once the process has
/// spawned a second thread. The offset is otherwise resolved when the first [`StdoutProvider`] or
/// [`Logger`][crate::Logger] is created, so a host that only creates its loggers after starting
/// other threads should call this at the start of `main()`. If the lookup fails, timestamps stay in
/// UTC for the rest of the process.
pub fn init_local_offset() -> UtcOffset {
    *Lazy::force(&LOCAL_OFFSET)
}

#[derive(Debug, Clone, Copy)]
enum Tag {
    Error,
    Debug,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Error => "[E]",
            Tag::Debug => "[D]",
        }
    }

    fn color_spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Tag::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
            Tag::Debug => spec.set_fg(Some(Color::Cyan)),
        };

        spec
    }
}

/// Writes one line per message in the form `<timestamp><prefix>[E]: <message>`, or `[D]` for debug
/// messages. This is what [`Logger::new()`][crate::Logger::new()] installs.
///
/// Write errors are ignored. The writer sits behind a lock, so a single provider can be shared
/// between loggers and threads without lines getting mixed up.
#[derive(Debug)]
pub struct StdoutProvider {
    prefix: String,
    target: Mutex<OutputTargetImpl>,
}

impl StdoutProvider {
    /// Write to STDOUT, with colors if STDOUT is a terminal that supports them.
    ///
    /// Timestamps use the local time zone if it could be determined when the first provider was
    /// created, and UTC otherwise. See [`init_local_offset()`].
    pub fn new(prefix: impl Into<String>) -> Self {
        let target = OutputTarget::Stdout;
        Self::for_target(prefix, target, target.color_support())
    }

    /// Write to the chosen stream using an explicit color choice.
    pub fn for_target(
        prefix: impl Into<String>,
        target: OutputTarget,
        color_choice: ColorChoice,
    ) -> Self {
        Self::from_impl(prefix, OutputTargetImpl::new(target, color_choice))
    }

    /// Write plain lines to an arbitrary writer.
    pub fn with_writer<W: io::Write + Send + 'static>(
        prefix: impl Into<String>,
        writer: W,
    ) -> Self {
        Self::from_impl(prefix, OutputTargetImpl::from_writer(writer))
    }

    /// Write to a writer that handles its own colors, e.g. [`termcolor::Ansi`].
    pub fn with_color_writer<W: WriteColor + Send + 'static>(
        prefix: impl Into<String>,
        writer: W,
    ) -> Self {
        Self::from_impl(prefix, OutputTargetImpl::from_color_writer(writer))
    }

    pub(crate) fn from_impl(prefix: impl Into<String>, target: OutputTargetImpl) -> Self {
        init_local_offset();

        Self {
            prefix: prefix.into(),
            target: Mutex::new(target),
        }
    }

    /// The prefix written between the timestamp and the tag.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn emit(&self, tag: Tag, args: fmt::Arguments<'_>) {
        let mut message = String::new();
        if message.write_fmt(args).is_err() {
            message.push_str(FORMAT_ERROR_TOKEN);
        }

        let timestamp = timestamp();
        let _ = self.target.lock().write_line(
            &timestamp,
            &self.prefix,
            tag.label(),
            &tag.color_spec(),
            &message,
        );
    }
}

impl Provider for StdoutProvider {
    fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Tag::Error, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Tag::Debug, args);
    }
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .to_offset(*LOCAL_OFFSET)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use termcolor::Ansi;

    use super::*;
    use crate::provider::testing::SharedBuffer;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn assert_timestamp(line: &str) {
        let bytes = line.as_bytes();
        assert!(bytes.len() >= 20, "line too short: {line:?}");
        for (idx, byte) in bytes[..20].iter().enumerate() {
            match idx {
                4 | 7 => assert_eq!(*byte, b'/', "in {line:?}"),
                10 | 19 => assert_eq!(*byte, b' ', "in {line:?}"),
                13 | 16 => assert_eq!(*byte, b':', "in {line:?}"),
                _ => assert!(byte.is_ascii_digit(), "in {line:?}"),
            }
        }
    }

    #[test]
    fn debug_lines_have_timestamp_prefix_and_tag() {
        let buffer = SharedBuffer::default();
        let provider = StdoutProvider::with_writer("APP ", buffer.clone());

        provider.debug(format_args!("count={}", 3));

        let output = buffer.contents();
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 1);
        assert_timestamp(&output);
        assert_eq!(&output[20..], "APP [D]: count=3\n");
    }

    #[test]
    fn error_lines_use_the_error_tag() {
        let buffer = SharedBuffer::default();
        let provider = StdoutProvider::with_writer("timer ", buffer.clone());

        provider.error(format_args!("lost {} samples", 2));
        provider.debug(format_args!("recovered"));

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("timer [E]: lost 2 samples"));
        assert!(lines[1].ends_with("timer [D]: recovered"));
    }

    #[test]
    fn failing_arguments_leave_an_inline_token() {
        let buffer = SharedBuffer::default();
        let provider = StdoutProvider::with_writer("", buffer.clone());

        provider.error(format_args!("value={}", Unprintable));

        assert!(buffer
            .contents()
            .ends_with("[E]: value=%!(FORMAT ERROR)\n"));
    }

    #[test]
    fn write_errors_are_swallowed() {
        let provider = StdoutProvider::with_writer("", BrokenPipe);

        provider.error(format_args!("nobody is listening"));
        provider.debug(format_args!("still nobody"));
    }

    #[test]
    fn color_writers_only_color_the_tag() {
        let buffer = SharedBuffer::default();
        let provider = StdoutProvider::with_color_writer("APP ", Ansi::new(buffer.clone()));

        provider.error(format_args!("boom"));

        let output = buffer.contents();
        let tag_start = output.find("APP ").unwrap() + "APP ".len();
        assert!(output[tag_start..].starts_with("\x1b["));
        assert!(output.contains("[E]\x1b[0m: boom\n"));
    }

    #[test]
    fn local_offset_is_resolved_once() {
        let offset = init_local_offset();
        let _provider = StdoutProvider::with_writer("", io::sink());

        assert_eq!(init_local_offset(), offset);
        assert_eq!(*LOCAL_OFFSET, offset);
    }

    #[test]
    fn providers_can_be_shared_between_threads() {
        let buffer = SharedBuffer::default();
        let provider = Arc::new(StdoutProvider::with_writer("", buffer.clone()));

        let handles: Vec<_> = (0..4)
            .map(|thread| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        provider.debug(format_args!("thread {thread} line {i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let output = buffer.contents();
        assert_eq!(output.lines().count(), 100);
        for line in output.lines() {
            assert_timestamp(line);
            assert!(line[20..].starts_with("[D]: thread "));
        }
    }
}
