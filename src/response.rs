use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Outcome marker carried in every JSON envelope.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status, code, message, data?}` body shared by every user endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: Status,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            code: code.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serialization() {
        let body = Envelope::success("Fetching users successfully!", vec![1, 2]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["code"], 200);
        assert_eq!(json["message"], "Fetching users successfully!");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = Envelope::error(StatusCode::BAD_REQUEST, "Email is invalid!");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], 400);
        assert!(json.get("data").is_none());
    }
}
