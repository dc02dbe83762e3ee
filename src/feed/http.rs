//! HTTP implementation of the guess feed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::config::FeedConfig;
use super::error::FeedError;
use super::{parse, GuessFeed};
use crate::models::Dataset;

/// Feed backed by the remote read-only JSON store.
pub struct HttpGuessFeed {
    client: reqwest::Client,
    url: String,
    retries: u32,
    timeout: Duration,
}

impl HttpGuessFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            retries: config.retries,
            timeout: config.timeout,
        })
    }

    async fn fetch_once(&self) -> Result<Dataset, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let records = parse::parse_document(&body)?;
        Ok(Dataset::from_unsorted(records))
    }
}

#[async_trait]
impl GuessFeed for HttpGuessFeed {
    async fn fetch(&self) -> Result<Dataset, FeedError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(dataset) => {
                    debug!(records = dataset.len(), url = %self.url, "feed fetch succeeded");
                    return Ok(dataset);
                }
                Err(FeedError::Http(e)) if attempt < self.retries && is_retryable(&e) => {
                    attempt += 1;
                    warn!(attempt, error = %e, "feed fetch failed, retrying");
                }
                Err(FeedError::Http(e)) if e.is_timeout() => {
                    return Err(FeedError::Timeout(self.timeout));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_retryable(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const FEED_BODY: &str =
        r#"{"-N1": {"guess": 42, "version": "solo", "timestamp": 1000}}"#;

    fn config_for(addr: std::net::SocketAddr, retries: u32) -> FeedConfig {
        FeedConfig {
            url: format!("http://{}/guesses.json", addr),
            timeout: Duration::from_millis(250),
            retries,
            ttl: Duration::from_secs(300),
        }
    }

    async fn answer(stream: &mut tokio::net::TcpStream) {
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            FEED_BODY.len(),
            FEED_BODY
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    }

    /// Server that stalls every connection past the client timeout, counting
    /// how many it accepted.
    fn stalling_server(listener: TcpListener) -> Arc<AtomicUsize> {
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });
        accepted
    }

    #[tokio::test]
    async fn test_retry_after_stalled_attempt_succeeds() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // First connection is held open past the client timeout; the
            // retry lands on the second and gets a real document.
            let (held, _) = listener.accept().await.unwrap();
            let (mut stream, _) = listener.accept().await.unwrap();
            answer(&mut stream).await;
            drop(held);
        });

        let feed = HttpGuessFeed::new(&config_for(addr, 1)).unwrap();
        let dataset = feed.fetch().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].guess, 42);
    }

    #[tokio::test]
    async fn test_stalled_feed_without_retries_maps_to_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = stalling_server(listener);

        let feed = HttpGuessFeed::new(&config_for(addr, 0)).unwrap();
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Timeout(d) if d == Duration::from_millis(250)));
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_retry_budget_maps_to_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = stalling_server(listener);

        let feed = HttpGuessFeed::new(&config_for(addr, 1)).unwrap();
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Timeout(_)));
        // One initial attempt plus the single configured retry.
        assert_eq!(accepted.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_document_is_not_retried() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let body = "[1, 2, 3]";
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
            }
        });

        let feed = HttpGuessFeed::new(&config_for(addr, 1)).unwrap();
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }
}
