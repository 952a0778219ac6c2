//! Runtime settings of the HTTP server, derived from `config.json` at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use wolfden_core::config::DEFAULT_PORT;
use wolfden_core::ConfigDocument;

/// Static entry page served for `/`.
pub const ENTRY_FILE: &str = "wolf.html";

/// Largest request body accepted for saves, presets and config updates.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the data files and static assets.
    pub root: PathBuf,
    pub entry_file: String,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Builds the runtime settings for `root` using the port stored in `document`.
    /// Changing the stored port takes effect on the next start only.
    pub fn from_document(document: &ConfigDocument, root: impl Into<PathBuf>) -> Self {
        ServerConfig {
            port: document.port(),
            root: root.into(),
            ..ServerConfig::default()
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn entry_path(&self) -> PathBuf {
        self.root.join(&self.entry_file)
    }
}

/// Directory containing the running executable. Data files and static assets
/// are resolved against it regardless of where the server was launched from.
pub fn install_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable {:?} has no parent directory", exe),
        )
    })
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            entry_file: ENTRY_FILE.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}
