//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;
use relay_core::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "relay-server", version, about = "HTTP relay in front of the project backend")]
pub struct Config {
    /// Address the front door listens on.
    #[arg(long, env = "RELAY_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Base URL of the backend every request is forwarded to.
    #[arg(long, env = "RELAY_BACKEND_URL", default_value = DEFAULT_BASE_URL)]
    pub backend_url: String,
}
