//! Response bodies shaped like the real backend's.

use serde_json::{Value, json};

/// Successful login/registration envelope.
pub fn auth_envelope(email: &str, token: &str) -> Value {
    json!({
        "message": "Login successful",
        "user": { "email": email },
        "token": token
    })
}

/// Error envelope.
pub fn error_envelope(message: &str) -> Value {
    json!({ "error": message })
}

/// Diagnosis with a single ranked suggestion.
pub fn diagnosis(condition: &str, probability: f64) -> Value {
    json!({
        "success": true,
        "diagnosis": {
            "suggestions": [{
                "condition": condition,
                "probability": probability,
                "recommendations": ["Stay hydrated"]
            }],
            "confidence": probability,
            "analysis": "Generated by the mock backend."
        }
    })
}

/// Image analysis result.
pub fn image_analysis(diagnosis: &str, confidence: f64) -> Value {
    json!({
        "success": true,
        "analysis": {
            "diagnosis": diagnosis,
            "conditions": [diagnosis],
            "confidence": confidence,
            "findings": ["Finding A", "Finding B"]
        }
    })
}
