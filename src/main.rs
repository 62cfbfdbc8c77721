use genapi::{run, ProcessEngine};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("GENAPI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let engine = ProcessEngine::from_env();
    if let Err(e) = run(std::env::args_os(), &engine) {
        e.report();
        std::process::exit(e.exit_code());
    }
}
