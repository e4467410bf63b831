//! Built-in probes

use async_trait::async_trait;
use checkup_core::{CheckContext, CheckOutcome, HealthCheck};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP reachability probe.
///
/// Healthy when a connection to the address succeeds within the dial
/// timeout; unhealthy with the connection error otherwise. The dial timeout
/// is the probe's own bound and is independent of any timeout declared on
/// the registration.
#[derive(Debug, Clone)]
pub struct TcpCheck {
    addr: SocketAddr,
    connect_timeout: Duration,
}

impl TcpCheck {
    /// Probe the given address with the default 5s dial timeout
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the dial timeout
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for TcpCheck {
    async fn check(
        &self,
        _cx: &CheckContext<'_>,
        _cancel: CancellationToken,
    ) -> anyhow::Result<CheckOutcome> {
        match timeout(self.connect_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_stream)) => {
                Ok(CheckOutcome::healthy().with_data("addr", json!(self.addr.to_string())))
            }
            Ok(Err(err)) => Ok(CheckOutcome::unhealthy()
                .with_description(format!("connection to {} failed", self.addr))
                .with_error(err.into())),
            Err(_) => Ok(CheckOutcome::unhealthy().with_description(format!(
                "connection to {} timed out after {}ms",
                self.addr,
                self.connect_timeout.as_millis()
            ))),
        }
    }
}
