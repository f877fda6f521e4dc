use serde::Deserialize;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub spa: SpaConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

// Serving root for the single-page application build output
#[derive(Debug, Deserialize, Clone)]
pub struct SpaConfig {
    pub root_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Config {
    /// Load configuration from an optional `config.toml` next to the
    /// process, falling back to compiled-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("spa.root_dir", "build")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Resolve the serving root to a canonical absolute directory.
///
/// A relative `root_dir` is interpreted next to the executable rather than
/// the caller's working directory, and the resolved path is threaded through
/// [`AppState`] so nothing depends on process-wide `chdir` state.
pub fn resolve_serving_root(root_dir: &str) -> io::Result<PathBuf> {
    let configured = Path::new(root_dir);
    let candidate = if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        let exe = std::env::current_exe()?;
        let exe_dir = exe.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory")
        })?;
        exe_dir.join(configured)
    };

    let root = candidate.canonicalize()?;
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("serving root '{}' is not a directory", root.display()),
        ));
    }
    Ok(root)
}

/// Shared per-request state: configuration plus the resolved serving root.
/// Read-only after startup, so no locking is needed in the request path.
pub struct AppState {
    pub config: Config,
    pub serving_root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, serving_root: PathBuf) -> Self {
        Self {
            config,
            serving_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load().expect("defaults should load without a config file");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.spa.root_dir, "build");
        assert!(cfg.logging.access_log);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load().expect("defaults should load");
        let addr = cfg.socket_addr().expect("default address should parse");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_resolve_absolute_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = resolve_serving_root(dir.path().to_str().expect("utf-8 temp path"))
            .expect("existing directory should resolve");
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }

    #[test]
    fn test_resolve_missing_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("no-such-build");
        assert!(resolve_serving_root(missing.to_str().expect("utf-8 temp path")).is_err());
    }
}
