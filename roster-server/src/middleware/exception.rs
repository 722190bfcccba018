//! Global failure translation
//!
//! Two pieces make up the outermost stage of the chain:
//! [`panic_responder`] plugs into `tower_http`'s `CatchPanicLayer` for
//! panics anywhere below it, and [`exception_boundary`] turns responses
//! marked with [`InternalFailure`] into the final 500 body. Either way the
//! partial response is dropped and the client sees `{message, detail}`.

use crate::api::ErrorResponse;
use crate::error::InternalFailure;
use crate::metrics;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use tracing::error;

/// Replace internally failed responses with the 500 error body
pub async fn exception_boundary(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<InternalFailure>() {
        Some(failure) => {
            error!(error = %failure.message, "Unhandled error: {}", failure.detail);
            metrics::record_internal_error("error");
            failure_response(failure, state.expose_error_detail)
        }
        None => response,
    }
}

/// Build the 500 response. `detail` is only sent when exposure is enabled.
pub fn failure_response(failure: InternalFailure, expose_detail: bool) -> Response {
    let body = ErrorResponse {
        message: failure.message,
        detail: expose_detail.then_some(failure.detail),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Panic handler for `CatchPanicLayer::custom`
pub fn panic_responder(
    expose_detail: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |payload: Box<dyn Any + Send + 'static>| {
        let message = panic_message(&*payload);
        error!(panic = %message, "Handler panicked");
        metrics::record_internal_error("panic");

        let failure = InternalFailure {
            detail: format!("panicked at request handling: {}", message),
            message,
        };
        failure_response(failure, expose_detail)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn failure() -> InternalFailure {
        InternalFailure {
            message: "This is a test exception.".to_string(),
            detail: "stack backtrace: ...".to_string(),
        }
    }

    fn payload<T: Any + Send>(value: T) -> Box<dyn Any + Send> {
        Box::new(value)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_failure_response_hides_detail_by_default() {
        let response = failure_response(failure(), false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "This is a test exception.");
        assert!(json.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_failure_response_with_detail() {
        let json = body_json(failure_response(failure(), true)).await;
        assert_eq!(json["detail"], "stack backtrace: ...");
    }

    #[tokio::test]
    async fn test_panic_responder_payloads() {
        let respond = panic_responder(true);

        let json = body_json(respond(payload("static str panic"))).await;
        assert_eq!(json["message"], "static str panic");

        let json = body_json(respond(payload(String::from("owned panic")))).await;
        assert_eq!(json["message"], "owned panic");
        assert!(json["detail"].as_str().unwrap().contains("owned panic"));

        let json = body_json(respond(payload(42u32))).await;
        assert_eq!(json["message"], "Unknown panic");
    }
}
