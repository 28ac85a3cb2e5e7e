//! HTTP HEAD probe.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::timeout;

use crate::error::{CoreError, ProbeError};

/// Build the client used for HEAD probes.
///
/// Idle connections are not pooled, so every probe closes its socket. Boards sit
/// on the local network, so system proxies are bypassed.
pub fn build_client() -> Result<Client, CoreError> {
    Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))
}

/// Send `HEAD http://address:port/` and require a 200 within `limit`.
pub async fn check_http(
    client: &Client,
    address: &str,
    port: u16,
    limit: Duration,
) -> Result<(), ProbeError> {
    let url = format!("http://{}:{}/", address, port);

    let response = match timeout(limit, client.head(&url).send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            return Err(ProbeError::Http {
                address: address.to_string(),
                port,
                message: e.to_string(),
            })
        }
        Err(_) => {
            return Err(ProbeError::Timeout {
                address: address.to_string(),
                port,
                timeout_ms: limit.as_millis(),
            })
        }
    };

    let status = response.status();
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ProbeError::Status {
            address: address.to_string(),
            port,
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve every connection with a fixed status line. Returns the bound port.
    pub async fn respond_with(status_line: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status_line
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        port
    }

    /// Accept connections but never answer.
    pub async fn silent() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        port
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{respond_with, silent};
    use super::*;

    #[tokio::test]
    async fn test_200_is_success() {
        let port = respond_with("200 OK").await;
        let client = build_client().unwrap();

        assert!(check_http(&client, "127.0.0.1", port, Duration::from_secs(2))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_other_status_is_failure() {
        let port = respond_with("204 No Content").await;
        let client = build_client().unwrap();

        let result = check_http(&client, "127.0.0.1", port, Duration::from_secs(2)).await;
        assert!(matches!(result, Err(ProbeError::Status { status: 204, .. })));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let port = silent().await;
        let client = build_client().unwrap();

        let result = check_http(&client, "127.0.0.1", port, Duration::from_millis(200)).await;
        assert!(matches!(result, Err(ProbeError::Timeout { .. })));
    }
}
