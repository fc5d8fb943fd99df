use crate::prelude::*;
use std::ops::Deref;
use tracing_subscriber::prelude::*;

/// Name of the environment variable with the logging filter directives
const LOG_FILTER_ENV: &str = "TFNZ_INSTALL_LOG";

/// The installation is silent on success. Warnings and errors about
/// the failed steps are always shown.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Sets up the global `tracing` subscriber that writes to stderr and
/// the panic hook that reports panics through it.
pub fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var("COLORS").as_deref() != Ok("0"));

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .with(tracing_error::ErrorLayer::default())
        .init();

    init_panic_hook();
}

fn init_panic_hook() {
    let current_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // The default hook must run first. The panic may happen inside of
        // `tracing` itself, and then the log below would never show up.
        current_hook(panic_info);

        let backtrace = std::backtrace::Backtrace::capture();
        let location = panic_info.location().map(|location| {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        });

        // Formatted panic messages are `String`, literal ones are `&str`
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<String>()
            .map(<_>::deref)
            .or_else(|| payload.downcast_ref::<&str>().map(<_>::deref))
            .unwrap_or("<unknown>");

        let span_trace = tracing_error::SpanTrace::capture();

        error!(
            target: "panic",
            thread = std::thread::current().name(),
            location,
            span_trace = %span_trace,
            backtrace = format_args!("\n{backtrace}"),
            "{message}"
        );
    }));
}
