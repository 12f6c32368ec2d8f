//! Health check response rendering and writing.
//!
//! # Responsibilities
//! - Map a verdict onto 200 / 503
//! - Render a minimal HTTP/1.1 response with an exact Content-Length
//! - Write it to the check channel and linger before returning
//!
//! # Design Decisions
//! - Rendering is pure; writing is generic over `AsyncWrite`
//! - `Connection: close` because every response ends the invocation
//! - The linger delay gives the reader time to drain the channel before teardown

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::health::Verdict;

/// Default delay between flushing the response and returning.
pub const DEFAULT_LINGER: Duration = Duration::from_millis(100);

pub const CONTENT_TYPE: &str = "text/plain";

/// A rendered health check response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: u16,
    pub body: String,
}

impl HealthResponse {
    pub fn reason_phrase(&self) -> &'static str {
        match self.status {
            200 => "OK",
            _ => "Service Unavailable",
        }
    }

    /// Serialize status line, headers, blank line and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nConnection: close\r\nContent-Length: {}\r\n\r\n",
            self.status,
            self.reason_phrase(),
            CONTENT_TYPE,
            self.body.len(),
        );

        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

/// Map a verdict onto a response.
pub fn render(verdict: &Verdict) -> HealthResponse {
    HealthResponse {
        status: if verdict.admit { 200 } else { 503 },
        body: format!("{}\r\n", verdict.reason),
    }
}

/// Write the response for `verdict`, flush, then wait `linger`.
pub async fn respond<W>(writer: &mut W, verdict: &Verdict, linger: Duration) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = render(verdict);
    writer.write_all(&response.to_bytes()).await?;
    writer.flush().await?;

    tracing::debug!(
        status = response.status,
        reason = %verdict.reason,
        "Response written"
    );

    if !linger.is_zero() {
        tokio::time::sleep(linger).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(bytes: &[u8]) -> (String, String) {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        (head.to_string(), body.to_string())
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .find_map(|l| l.strip_prefix("Content-Length: "))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_admit_renders_200() {
        let response = render(&Verdict::admit("status is Synced"));
        assert_eq!(response.status, 200);

        let (head, body) = split(&response.to_bytes());
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: text/plain"));
        assert!(head.contains("Connection: close"));
        assert_eq!(body, "status is Synced\r\n");
    }

    #[test]
    fn test_reject_renders_503() {
        let response = render(&Verdict::reject("status is Joining"));
        let (head, body) = split(&response.to_bytes());
        assert!(head.starts_with("HTTP/1.1 503 Service Unavailable\r\n"));
        assert!(body.contains("Joining"));
    }

    #[test]
    fn test_content_length_matches_body_bytes() {
        for reason in ["status is Synced", "status is Joining: ünïcode", ""] {
            let bytes = render(&Verdict::reject(reason)).to_bytes();
            let (head, body) = split(&bytes);
            assert_eq!(content_length(&head), body.as_bytes().len());
        }
    }

    #[tokio::test]
    async fn test_respond_writes_full_response() {
        let mut out = Vec::new();
        let verdict = Verdict::admit("status is Synced");
        respond(&mut out, &verdict, Duration::ZERO).await.unwrap();
        assert_eq!(out, render(&verdict).to_bytes());
    }

    #[tokio::test]
    async fn test_respond_lingers() {
        let linger = Duration::from_millis(30);
        let mut out = Vec::new();
        let started = std::time::Instant::now();
        respond(&mut out, &Verdict::reject("x"), linger).await.unwrap();
        assert!(started.elapsed() >= linger);
    }
}
