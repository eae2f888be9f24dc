use std::future::Future;

use reqwest::{StatusCode, Url};

use super::TransportError;

/// What the query endpoint sent back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

/// The outbound half of the console: one `GET` per call.
pub trait Transport {
    fn get(&self, url: Url) -> impl Future<Output = Result<Reply, TransportError>> + Send;
}

/// A [`Transport`] backed by a reqwest client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<Reply, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    fn transport() -> HttpTransport {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client");
        HttpTransport::from_client(client)
    }

    /// Serve a single canned HTTP response and hand back the request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{status_line}\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                len = body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&head).to_string()
        });

        let url = Url::parse(&format!("http://{addr}/query")).expect("url");
        (url, handle)
    }

    #[tokio::test]
    async fn test_get_reads_status_and_body() {
        let (mut url, server) = serve_once("HTTP/1.1 200 OK", r#"[{"id":1}]"#).await;
        url.query_pairs_mut().append_pair("q", "SELECT 1;");

        let transport = transport();
        let reply = transport.get(url).await.expect("reply");

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, r#"[{"id":1}]"#);

        let head = server.await.expect("server task");
        let request_line = head.lines().next().unwrap_or_default();
        assert_eq!(request_line, "GET /query?q=SELECT+1%3B HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_keeps_error_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"error":"No database selected"}"#,
        )
        .await;

        let transport = transport();
        let reply = transport.get(url).await.expect("reply");

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body, r#"{"error":"No database selected"}"#);
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn test_get_unreachable() {
        // bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/query")).expect("url");
        let transport = transport();
        let result = transport.get(url).await;

        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
