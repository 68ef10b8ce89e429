//! The output targets for the default provider.

use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::io::{self, Write};
use std::str::FromStr;
use termcolor::{ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// The environment variable for selecting the default provider's output stream.
pub(crate) const TIMING_LOG_ENV: &str = "TIMING_LOG";

/// The stream the default provider writes its lines to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Write to STDOUT. This is the default.
    #[default]
    Stdout,
    /// Write to STDERR.
    Stderr,
}

/// An error raised when an [`OutputTarget`] could not be parsed from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutputTargetError {
    input: String,
}

impl Error for ParseOutputTargetError {}

impl Display for ParseOutputTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown output target '{}', expected 'stdout' or 'stderr'",
            self.input
        )
    }
}

impl FromStr for OutputTarget {
    type Err = ParseOutputTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("stdout") {
            Ok(Self::Stdout)
        } else if s.eq_ignore_ascii_case("stderr") {
            Ok(Self::Stderr)
        } else {
            Err(ParseOutputTargetError {
                input: s.to_owned(),
            })
        }
    }
}

impl OutputTarget {
    /// Parse the `TIMING_LOG` environment variable. Defaults to [`OutputTarget::Stdout`] when the
    /// variable is not set. If it contains something other than `stdout` or `stderr`, then this
    /// writes a warning to STDERR and falls back to STDOUT.
    pub fn default_from_environment() -> Self {
        let timing_log_env = std::env::var(TIMING_LOG_ENV).ok();
        Self::from_env_value(timing_log_env.as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Stdout,
            Some(value) => match value.parse() {
                Ok(target) => target,
                Err(err) => {
                    eprintln!("Ignoring {TIMING_LOG_ENV}, falling back to STDOUT: {err}");
                    Self::Stdout
                }
            },
        }
    }

    /// Whether to use colors when writing to this stream. Considers the `CLICOLOR`,
    /// `CLICOLOR_FORCE`, and `NO_COLOR` environment variables, and whether or not the stream is
    /// attached to a real TTY.
    pub fn color_support(self) -> ColorChoice {
        let env_flag = |name: &str| std::env::var(name).ok().map(|value| value.trim() != "0");
        let stream = match self {
            OutputTarget::Stdout => atty::Stream::Stdout,
            OutputTarget::Stderr => atty::Stream::Stderr,
        };

        choose_color(
            env_flag("CLICOLOR_FORCE"),
            env_flag("NO_COLOR"),
            env_flag("CLICOLOR"),
            atty::is(stream),
        )
    }
}

/// Each flag is `None` when its variable is unset, and `Some(false)` when it is set to `0`.
fn choose_color(
    clicolor_force: Option<bool>,
    no_color: Option<bool>,
    clicolor: Option<bool>,
    is_tty: bool,
) -> ColorChoice {
    match (clicolor_force, no_color, clicolor) {
        (Some(true), _, _) => ColorChoice::Always,
        (_, Some(true), _) | (_, _, Some(false)) => ColorChoice::Never,
        // Pipes and files stay plain. For terminals, termcolor still checks `TERM` itself.
        _ if is_tty => ColorChoice::Auto,
        _ => ColorChoice::Never,
    }
}

/// Similar to [`OutputTarget`], but contains the actual stream the default provider writes to.
pub(crate) enum OutputTargetImpl {
    Stdout(StandardStream),
    Stderr(StandardStream),
    /// Any other writer. Plain writers are wrapped in [`NoColor`].
    Writer(Box<dyn WriteColor + Send>),
}

impl Debug for OutputTargetImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, stream) = match self {
            OutputTargetImpl::Stdout(stream) => ("Stdout", stream),
            OutputTargetImpl::Stderr(stream) => ("Stderr", stream),
            OutputTargetImpl::Writer(writer) => {
                return f
                    .debug_tuple("Writer")
                    .field(if writer.supports_color() {
                        &"<writer with color support>"
                    } else {
                        &"<writer>"
                    })
                    .finish()
            }
        };

        f.debug_tuple(name)
            .field(if stream.supports_color() {
                &"<stream with color support>"
            } else {
                &"<stream>"
            })
            .finish()
    }
}

impl OutputTargetImpl {
    pub fn new(target: OutputTarget, color_choice: ColorChoice) -> Self {
        match target {
            OutputTarget::Stdout => OutputTargetImpl::Stdout(StandardStream::stdout(color_choice)),
            OutputTarget::Stderr => OutputTargetImpl::Stderr(StandardStream::stderr(color_choice)),
        }
    }

    pub fn from_writer<W: io::Write + Send + 'static>(writer: W) -> Self {
        OutputTargetImpl::Writer(Box::new(NoColor::new(writer)))
    }

    pub fn from_color_writer<W: WriteColor + Send + 'static>(writer: W) -> Self {
        OutputTargetImpl::Writer(Box::new(writer))
    }

    /// Write a single log line. Standard streams are locked for the whole line, so colored lines
    /// from different providers sharing STDOUT or STDERR stay intact.
    pub fn write_line(
        &mut self,
        timestamp: &str,
        prefix: &str,
        tag: &str,
        tag_color: &ColorSpec,
        message: &str,
    ) -> io::Result<()> {
        match self {
            OutputTargetImpl::Stdout(stream) | OutputTargetImpl::Stderr(stream) => write_line_to(
                &mut stream.lock(),
                timestamp,
                prefix,
                tag,
                tag_color,
                message,
            ),
            OutputTargetImpl::Writer(writer) => {
                write_line_to(&mut **writer, timestamp, prefix, tag, tag_color, message)
            }
        }
    }
}

/// Without colors the line is assembled up front and written with a single call.
fn write_line_to(
    writer: &mut dyn WriteColor,
    timestamp: &str,
    prefix: &str,
    tag: &str,
    tag_color: &ColorSpec,
    message: &str,
) -> io::Result<()> {
    if writer.supports_color() {
        write!(writer, "{timestamp}{prefix}")?;
        writer.set_color(tag_color)?;
        write!(writer, "{tag}")?;
        writer.reset()?;
        writeln!(writer, ": {message}")?;
    } else {
        let line = format!("{timestamp}{prefix}{tag}: {message}\n");
        writer.write_all(line.as_bytes())?;
    }

    writer.flush()
}
