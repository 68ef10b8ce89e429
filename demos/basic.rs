use timing_log::{LoggerBuilder, OutputTarget};

fn main() {
    // Resolve the local time zone before any other threads exist
    timing_log::init_local_offset();

    // `Logger::new()` always writes to STDOUT. The builder instead looks at the `TIMING_LOG`
    // environment variable unless a target is set explicitly.
    let logger = timing_log::Logger::new("[timer] ");

    // Logging is disabled by default, so this is never printed
    timing_log::debug!(logger, "This is not printed");

    logger.set_mode(true);
    timing_log::debug!(logger, "Sampled {} ticks in {}ms", 1024, 16);
    timing_log::error!(logger, "Clock went backwards by {}ns", 250);

    let stderr_logger = LoggerBuilder::new("[stderr] ")
        .with_output_target(OutputTarget::Stderr)
        .enabled(true)
        .build();
    timing_log::error!(stderr_logger, "This one goes to STDERR");
}
