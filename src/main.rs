use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Startup precondition: the build output must exist before we bind.
    let serving_root = match config::resolve_serving_root(&cfg.spa.root_dir) {
        Ok(root) => root,
        Err(_) => {
            println!(
                "Build directory '{}' not found. Run 'npm run build' first.",
                cfg.spa.root_dir
            );
            std::process::exit(1);
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg, serving_root))
}

async fn async_main(
    cfg: config::Config,
    serving_root: std::path::PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(cfg, serving_root));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&state.config, &state.serving_root);

    server::run_accept_loop(listener, state, active_connections, signals).await;
    Ok(())
}
