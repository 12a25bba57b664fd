use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_NAMESERVER: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);
pub const DEFAULT_MAX_DEPTH: i32 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_ATTEMPTS: usize = 2;

/// Settings for one validation call: which nameserver to ask, how deep
/// include/redirect chains may nest and how patient the transport is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    nameserver: SocketAddr,
    max_depth: i32,
    timeout: Duration,
    attempts: usize,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nameserver(mut self, nameserver: SocketAddr) -> Self {
        self.nameserver = nameserver;
        self
    }

    /// A negative budget disables the include/redirect depth guard.
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn unbounded(self) -> Self {
        self.with_max_depth(-1)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            nameserver: DEFAULT_NAMESERVER,
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: DEFAULT_TIMEOUT,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}
