use crate::config::Config;
use crate::handler::router::MOUNT_PREFIX;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(config: &Config, serving_root: &Path) {
    println!("======================================");
    println!("Ludus static server started");
    println!("Serving from: {}", serving_root.display());
    println!("Application mounted at: {MOUNT_PREFIX}");
    println!("Server running at:");
    println!("  http://localhost:{}{}", config.server.port, MOUNT_PREFIX);
    println!("  http://127.0.0.1:{}{}", config.server.port, MOUNT_PREFIX);
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!(
        "[{}] [Request] {method} {uri} {version:?}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z")
    );
}

pub fn log_response(status: u16, size: usize) {
    println!("[Response] {status} ({size} bytes)");
}

pub fn log_redirect(from: &str, target: &str) {
    println!("[Redirect] {from} -> {target}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_shutdown() {
    println!("\nServer stopped");
}
