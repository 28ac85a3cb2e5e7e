//! TCP connect probe.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::ProbeError;

/// Try to open a TCP connection to `address:port` within `limit`.
///
/// The stream is dropped as soon as the handshake completes.
pub async fn check_tcp(address: &str, port: u16, limit: Duration) -> Result<(), ProbeError> {
    match timeout(limit, TcpStream::connect((address, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            Ok(())
        }
        Ok(Err(source)) => Err(ProbeError::Connect {
            address: address.to_string(),
            port,
            source,
        }),
        Err(_) => Err(ProbeError::Timeout {
            address: address.to_string(),
            port,
            timeout_ms: limit.as_millis(),
        }),
    }
}
