//! Uniform response wrapper returned by every backend endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON envelope shared by all endpoints.
///
/// Every field is optional. Fields an endpoint returns beyond the common
/// ones are kept in `extra`, so decoding into an envelope never loses data.
///
/// An explicit `null` in one of the common fields reads as `None`, the same
/// as a missing key, and is omitted when the envelope is serialized again.
/// Unknown fields in `extra` keep their `null` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// User profile, cached verbatim by the session storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Endpoint-specific top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the login and registration endpoints.
pub type AuthResponse = ApiEnvelope;

impl<T> ApiEnvelope<T> {
    /// Returns the session token when the response carries a non-empty one.
    pub fn session_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns an endpoint-specific top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_login_envelope_roundtrip() {
        let body = json!({
            "message": "Login successful",
            "user": { "email": "a@b.com" },
            "token": "tok123"
        });

        let envelope: AuthResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(envelope.session_token(), Some("tok123"));
        assert_eq!(envelope.user, Some(json!({ "email": "a@b.com" })));
        assert_eq!(serde_json::to_value(&envelope).unwrap(), body);
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({
            "success": true,
            "records": [{ "fileId": "f1" }]
        }))
        .unwrap();

        assert_eq!(envelope.success, Some(true));
        assert_eq!(envelope.field("records"), Some(&json!([{ "fileId": "f1" }])));
    }

    #[test]
    fn test_null_common_fields_read_as_absent() {
        let envelope: AuthResponse = serde_json::from_value(json!({
            "message": null,
            "user": { "email": "a@b.com" },
            "token": "tok123",
            "refreshToken": null
        }))
        .unwrap();

        assert!(envelope.message.is_none());
        assert_eq!(envelope.session_token(), Some("tok123"));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "user": { "email": "a@b.com" },
                "token": "tok123",
                "refreshToken": null
            })
        );
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let envelope: AuthResponse = serde_json::from_value(json!({ "token": "" })).unwrap();
        assert!(envelope.session_token().is_none());
    }
}
