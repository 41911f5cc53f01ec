//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WORDS_PATH: &str = "assets/words.txt";
pub const DEFAULT_SOLVE_TIMEOUT: Duration = Duration::from_secs(2);

/// CORS preflight cache lifetime (20 days).
pub const CORS_MAX_AGE: Duration = Duration::from_secs(1_728_000);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub words_path: PathBuf,
    /// Only origin allowed by CORS. With `None` no CORS headers are sent.
    pub allowed_origin: Option<String>,
    /// Upper bound on a single solve; expiry is answered as "no ladder".
    pub solve_timeout: Duration,
    /// Seed for random pair selection, for reproducible games.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            words_path: PathBuf::from(DEFAULT_WORDS_PATH),
            allowed_origin: None,
            solve_timeout: DEFAULT_SOLVE_TIMEOUT,
            seed: None,
        }
    }
}
