//! Tracker errors as HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::port::inbound::tracker::TrackerError;

/// Wraps [`TrackerError`] so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TrackerError::InvalidTicker { .. } => StatusCode::BAD_REQUEST,
            TrackerError::PriceNotFound { .. } => StatusCode::NOT_FOUND,
            TrackerError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            TrackerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_error_kind() {
        let cases = [
            (TrackerError::invalid("x"), StatusCode::BAD_REQUEST),
            (
                TrackerError::PriceNotFound { symbol: "XUSDT".into() },
                StatusCode::NOT_FOUND,
            ),
            (
                TrackerError::UpstreamUnavailable("down".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                TrackerError::Storage("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
