use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vegl_scriptgen::cli;

fn init_tracing() {
    // VEGL_SCRIPTGEN_LOG=debug shows per-field classification
    let filter = EnvFilter::try_from_env("VEGL_SCRIPTGEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn main() {
    init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
