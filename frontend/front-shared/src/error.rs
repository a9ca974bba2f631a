use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request failed with status code {code}")]
    Status { code: u16, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Decode(err.to_string())
    }
}

/// Turns a failed request into a message fit for showing to the user.
///
/// API errors carry their text in `errors[0].detail`; responses proxied from
/// the daemon use a plain `error` string instead. Anything else falls back to
/// the error's own description, so the result is never empty.
pub fn http_error_to_human(err: &HttpError) -> String {
    if let HttpError::Status { body, .. } = err {
        if let Ok(data) = serde_json::from_str::<Value>(body) {
            let detail = data
                .pointer("/errors/0/detail")
                .and_then(Value::as_str)
                .filter(|detail| !detail.is_empty());
            if let Some(detail) = detail {
                return detail.to_string();
            }
            if let Some(message) = data.get("error").and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_api_error_detail() {
        let err = HttpError::Status {
            code: 404,
            body: r#"{"errors":[{"code":"NotFoundHttpException","status":"404","detail":"The requested resource could not be found on the server."}]}"#.into(),
        };
        assert_eq!(
            http_error_to_human(&err),
            "The requested resource could not be found on the server."
        );
    }

    #[test]
    fn uses_daemon_error_string() {
        let err = HttpError::Status {
            code: 502,
            body: r#"{"error":"daemon is unreachable"}"#.into(),
        };
        assert_eq!(http_error_to_human(&err), "daemon is unreachable");
    }

    #[test]
    fn falls_back_to_description() {
        let err = HttpError::Status { code: 500, body: "<html>oops</html>".into() };
        assert_eq!(http_error_to_human(&err), "Request failed with status code 500");

        let err = HttpError::Transport("connection refused".into());
        assert_eq!(http_error_to_human(&err), "Network error: connection refused");

        let err = HttpError::Status { code: 403, body: r#"{"errors":[{"detail":""}]}"#.into() };
        assert!(!http_error_to_human(&err).is_empty());
    }
}
