//! Recipe API request and response structures

use serde::{Deserialize, Serialize};

/// Inbound payload for recipe generation
///
/// The `api_key` is an opaque per-request credential. It is forwarded once to
/// the provider and dropped with the request; it must never be logged or
/// echoed back to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRequest {
    pub diet_type: String,
    pub api_key: String,
}

/// Successful generation result
///
/// `diet_type` echoes the caller's input verbatim, even when the value was
/// unrecognized and the prompt fell back to the default description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipe: String,
    pub diet_type: String,
}

/// Error envelope returned with HTTP 500
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    /// Wrap a generation error in the uniform envelope
    pub fn generation(err: impl std::fmt::Display) -> Self {
        Self {
            detail: format!("Error generating recipe: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_prefix() {
        let envelope = ErrorResponse::generation("Authentication failed: bad key");
        assert_eq!(
            envelope.detail,
            "Error generating recipe: Authentication failed: bad key"
        );
    }

    #[test]
    fn test_request_deserialization() {
        let request: RecipeRequest =
            serde_json::from_str(r#"{"diet_type": "vegan", "api_key": "sk-test"}"#).unwrap();
        assert_eq!(request.diet_type, "vegan");
        assert_eq!(request.api_key, "sk-test");
    }

    #[test]
    fn test_response_serialization() {
        let response = RecipeResponse {
            success: true,
            recipe: "Recipe Name: Lentil Stew".to_string(),
            diet_type: "vegan".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["recipe"], "Recipe Name: Lentil Stew");
        assert_eq!(json["diet_type"], "vegan");
    }
}
