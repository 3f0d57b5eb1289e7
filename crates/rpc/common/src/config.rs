use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HTTP_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_HTTP_PORT: u16 = 5052;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcServerConfig {
    pub http_socket_address: SocketAddr,
}

impl RpcServerConfig {
    /// Creates a new instance from CLI arguments
    pub fn new(http_address: IpAddr, http_port: u16) -> Self {
        Self {
            http_socket_address: SocketAddr::new(http_address, http_port),
        }
    }
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_ADDRESS, DEFAULT_HTTP_PORT)
    }
}
