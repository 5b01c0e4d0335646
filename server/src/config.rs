use error_stack::{Report, ResultExt};
use kernel::KernelError;
use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;

static SERVER_ADDR: &str = "SERVER_ADDR";
static LOG_DIR: &str = "LOG_DIR";
static RUST_LOG: &str = "RUST_LOG";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs/";
const DEFAULT_LOG_FILTER: &str = "application=debug,driver=debug,server=debug,tower_http=debug,sqlx=info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads the process environment after loading `.env` if one exists.
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let _ = dotenvy::dotenv();
        let addr = var_or(SERVER_ADDR, DEFAULT_ADDR)?;
        let addr = addr
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{SERVER_ADDR} is not a socket address: {addr}"))?;
        Ok(Self {
            addr,
            log_dir: PathBuf::from(var_or(LOG_DIR, DEFAULT_LOG_DIR)?),
            log_filter: var_or(RUST_LOG, DEFAULT_LOG_FILTER)?,
        })
    }
}

fn var_or(key: &str, default: &str) -> error_stack::Result<String, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(value),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read {key}"))),
    }
}
