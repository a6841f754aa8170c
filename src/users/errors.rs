use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::response::Envelope;

/// Failures of the user endpoints. Messages are the fixed client-facing texts.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("Please fill all fields correctly!")]
    MissingFields,

    #[error("Email is invalid!")]
    InvalidEmail,

    #[error("Email has been registered!")]
    EmailTaken,

    #[error("Register failed!")]
    RegisterFailed,

    #[error("Fetching user by Id failed!")]
    ProfileUnavailable,

    #[error("Email or password is wrong!")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error")]
    Unexpected(#[from] anyhow::Error),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::Forbidden => StatusCode::FORBIDDEN,
            UserError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            UserError::Forbidden => status.into_response(),
            UserError::Unexpected(e) => {
                error!(error = ?e, "unexpected error");
                Envelope::error(status, self.to_string()).into_response()
            }
            _ => Envelope::error(status, self.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_failures_are_bad_requests() {
        for e in [
            UserError::MissingFields,
            UserError::InvalidEmail,
            UserError::EmailTaken,
            UserError::RegisterFailed,
            UserError::ProfileUnavailable,
            UserError::InvalidCredentials,
        ] {
            assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn forbidden_has_no_body_detail() {
        let res = UserError::Forbidden.into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().get(axum::http::header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn unexpected_hides_cause() {
        let e = UserError::from(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "Internal server error");
    }
}
