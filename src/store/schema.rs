use serde::{Deserialize, Serialize};

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Error payload of a non-2xx response: `{"error": "..."}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Extract the reason from an error response body. Anything that is not the
/// expected JSON shape yields "Unknown error".
pub fn rejection_reason(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_from_error_body() {
        assert_eq!(rejection_reason(r#"{"error": "Invalid index"}"#), "Invalid index");
    }

    #[test]
    fn test_reason_defaults_to_unknown() {
        assert_eq!(rejection_reason(""), UNKNOWN_ERROR);
        assert_eq!(rejection_reason("<html>oops</html>"), UNKNOWN_ERROR);
        assert_eq!(rejection_reason(r#"{"message": "nope"}"#), UNKNOWN_ERROR);
        assert_eq!(rejection_reason(r#"{"error": ""}"#), UNKNOWN_ERROR);
    }
}
