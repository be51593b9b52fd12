use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use adtruth_ai::{ProviderConfig, ProviderKind};

use crate::services::fact_check::FactCheckConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "history.db";

/// Everything the server needs to wire its collaborators together.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub ai: ProviderConfig,
    pub fact_check: FactCheckConfig,
}

impl AppConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            ai: ProviderConfig::new(ProviderKind::Cohere, ""),
            fact_check: FactCheckConfig::default(),
        }
    }
}
