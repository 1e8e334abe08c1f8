#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
use std::path::PathBuf;

use sewa::{Args, DataPath, DataPathType};
use sewa_chrome::{setup::generate_native_options, SewaChrome};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn setup_logging(path: &DataPath, debug: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::{
        non_blocking,
        rolling::{RollingFileAppender, Rotation},
    };
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        path.path(DataPathType::Log),
        format!("sewa-{}.log", env!("CARGO_PKG_VERSION")),
    );

    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // Log to stdout (if you run with `RUST_LOG=debug`).
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    let default_filter = if debug {
        "sewa=debug,sewa_calendar=debug,sewa_chrome=debug"
    } else {
        "sewa=info,sewa_calendar=info,sewa_chrome=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(env_filter)
        .init();

    guard
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (parsed_args, _) = Args::parse(&args);

    let base_path = parsed_args
        .datapath
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(DataPath::default_base_or_cwd);
    let path = DataPath::new(&base_path);

    // keep the guard alive so buffered log lines are flushed on exit
    let _guard = setup_logging(&path, parsed_args.debug);

    let res = eframe::run_native(
        "Sewa Calendar",
        generate_native_options(&path),
        Box::new(move |_cc| Ok(Box::new(SewaChrome::new(base_path, &args)?))),
    );

    if let Err(err) = res {
        error!("sewa exited with an error: {err}");
    }
}
