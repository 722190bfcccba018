//! Request and response logging

use crate::error::ApiError;
use crate::metrics;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::{response::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::borrow::Cow;
use std::time::Instant;
use tracing::info;

/// A response whose body has been fully read into memory
#[derive(Debug)]
pub struct CapturedResponse {
    parts: Parts,
    body: Bytes,
}

impl CapturedResponse {
    /// Drain the body of `response`, keeping status, headers and extensions
    pub async fn capture(response: Response) -> Result<Self, axum::Error> {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await?;
        Ok(Self { parts, body })
    }

    /// Response status
    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    /// Raw body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Rebuild the response from the captured parts and bytes
    pub fn replay(self) -> Response {
        Response::from_parts(self.parts, Body::from(self.body))
    }
}

/// Log the request line, then the final status and body of the response
pub async fn log_exchange(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    info!("Incoming Request: {} {}", method, path);

    let start = Instant::now();
    let response = next.run(req).await;

    let captured = match CapturedResponse::capture(response).await {
        Ok(captured) => captured,
        Err(err) => {
            let err = anyhow::Error::new(err).context("Failed to buffer response body");
            return ApiError::Internal(err).into_response();
        }
    };

    info!(
        "Outgoing Response: {} {}",
        captured.status().as_u16(),
        captured.body_text()
    );
    metrics::record_request(
        method.as_str(),
        captured.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    captured.replay()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{CONTENT_TYPE, LOCATION};

    #[tokio::test]
    async fn test_replay_preserves_status_headers_and_body() {
        let original = Response::builder()
            .status(StatusCode::CREATED)
            .header(CONTENT_TYPE, "application/json")
            .header(LOCATION, "/api/users/1")
            .body(Body::from(r#"{"id":1}"#))
            .unwrap();

        let captured = CapturedResponse::capture(original).await.unwrap();
        assert_eq!(captured.status(), StatusCode::CREATED);
        assert_eq!(captured.body_text(), r#"{"id":1}"#);

        let replayed = captured.replay();
        assert_eq!(replayed.status(), StatusCode::CREATED);
        assert_eq!(replayed.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(replayed.headers()[LOCATION], "/api/users/1");

        let bytes = to_bytes(replayed.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"id":1}"#);
    }

    #[tokio::test]
    async fn test_capture_keeps_extensions() {
        let mut original = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        original.extensions_mut().insert(7u8);

        let replayed = CapturedResponse::capture(original).await.unwrap().replay();
        assert_eq!(replayed.extensions().get::<u8>(), Some(&7));
    }

    #[tokio::test]
    async fn test_binary_body_is_replayed_verbatim() {
        let bytes: &'static [u8] = &[0xff, 0x00, 0xfe];
        let captured = CapturedResponse::capture(Response::new(Body::from(bytes)))
            .await
            .unwrap();
        assert_eq!(captured.body().as_ref(), bytes);
        assert!(captured.body_text().contains('\u{FFFD}'));

        let out = to_bytes(captured.replay().into_body(), usize::MAX).await.unwrap();
        assert_eq!(out.as_ref(), bytes);
    }
}
