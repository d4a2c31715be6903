use std::process::ExitCode;
use std::sync::Arc;

use addin_preview::config::{AppState, Config};
use addin_preview::logger;
use addin_preview::server;

fn main() -> ExitCode {
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("✗ Error loading configuration: {e}");
            return ExitCode::from(1);
        }
    };
    let port = cfg.server.port;

    // Current-thread runtime: requests are served one at a time
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            println!("✗ Unexpected error: {e}");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(run(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_startup_error(e.as_ref(), port);
            ExitCode::from(1)
        }
    }
}

/// Configure, bind, and serve until interrupted.
async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let root = cfg.resolve_root()?;
    let addr = cfg.socket_addr()?;
    let port = cfg.server.port;

    logger::log_startup(&root, port);

    let listener = server::bind_listener(addr)?;

    logger::log_ready(port);

    let state = Arc::new(AppState::new(cfg, root));
    let shutdown = Arc::new(tokio::sync::Notify::new());
    server::start_signal_listener(Arc::clone(&shutdown));

    server::run_serve_loop(listener, state, shutdown).await;

    logger::log_shutdown();
    Ok(())
}

/// Report a startup failure, distinguishing the one actionable case:
/// the port is already taken by another listener.
fn report_startup_error(err: &(dyn std::error::Error + 'static), port: u16) {
    if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
        if server::is_addr_in_use(io_err) {
            println!("✗ Error: Port {port} is already in use");
            println!("  Try stopping other servers or use a different port");
            return;
        }
    }
    println!("✗ Error starting server: {err}");
}
