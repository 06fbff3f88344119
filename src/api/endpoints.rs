//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the recipe server: the static
//! index page, recipe generation, and a health check.

use crate::core::assets;
use crate::core::config::Config;
use crate::core::prompt;
use crate::core::provider::{Provider, ProviderError};
use crate::models::api::{ErrorResponse, RecipeRequest, RecipeResponse};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn Provider>,
    /// Static asset directory, resolved at startup
    pub static_dir: PathBuf,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate-recipe", post(generate_recipe))
        .route("/health", get(health_check))
        .with_state(state)
}

/// GET / - Serve the static index page
async fn index(State(state): State<AppState>) -> Response {
    match assets::load_index(&state.static_dir).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) => {
            error!("Failed to read index page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// POST /api/generate-recipe - Generate a recipe for a dietary preference
///
/// The caller's API key is used for exactly one outbound call and is never
/// logged or included in the response.
async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    info!(
        "Incoming recipe request: id={}, diet_type={}",
        request_id, request.diet_type
    );

    match run_generation(state.provider.as_ref(), &state.config.model, &request).await {
        Ok(response) => {
            debug!(
                "Recipe generated: id={}, length={}",
                request_id,
                response.recipe.len()
            );
            Json(response).into_response()
        }
        Err(e) => {
            error!("Recipe generation failed: id={}, error={}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::generation(e)),
            )
                .into_response()
        }
    }
}

/// Build the prompt, call the provider, and shape the result envelope
///
/// All failures collapse into one `ProviderError`; the HTTP layer above maps
/// that to a single 500 envelope. No partial results.
async fn run_generation(
    provider: &dyn Provider,
    model: &str,
    request: &RecipeRequest,
) -> Result<RecipeResponse, ProviderError> {
    let chat_request = prompt::build_request(model, &request.diet_type);

    let response = provider
        .create_chat_completion(&chat_request, &request.api_key)
        .await?;

    let recipe = response
        .first_content()
        .ok_or_else(|| ProviderError::Unexpected("Provider returned no choices".to_string()))?;

    Ok(RecipeResponse {
        success: true,
        recipe: recipe.to_string(),
        diet_type: request.diet_type.clone(),
    })
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "provider": state.provider.provider_name(),
        "model": state.config.model,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openai::{
        ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider double that records the request it was handed
    struct MockProvider {
        reply: Result<String, fn() -> ProviderError>,
        seen: Mutex<Option<(ChatCompletionRequest, String)>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn failing(err: fn() -> ProviderError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        async fn create_chat_completion(
            &self,
            request: &ChatCompletionRequest,
            api_key: &str,
        ) -> Result<ChatCompletionResponse, ProviderError> {
            *self.seen.lock().unwrap() = Some((request.clone(), api_key.to_string()));
            match &self.reply {
                Ok(text) => Ok(ChatCompletionResponse {
                    id: Some("chatcmpl-test".to_string()),
                    choices: vec![ChatChoice {
                        index: 0,
                        message: ChatMessage {
                            role: "assistant".to_string(),
                            content: text.clone(),
                        },
                        finish_reason: Some("stop".to_string()),
                    }],
                    usage: None,
                }),
                Err(make) => Err(make()),
            }
        }

        fn provider_name(&self) -> &str {
            "Mock"
        }
    }

    fn state_with(provider: Arc<dyn Provider>) -> AppState {
        AppState {
            config: Arc::new(Config::default()),
            provider,
            static_dir: PathBuf::from("static"),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generation_success_envelope() {
        let provider = Arc::new(MockProvider::replying("Recipe Name: Lentil Stew..."));
        let state = state_with(provider.clone());

        let response = generate_recipe(
            State(state),
            Json(RecipeRequest {
                diet_type: "vegan".to_string(),
                api_key: "sk-valid".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["recipe"], "Recipe Name: Lentil Stew...");
        assert_eq!(body["diet_type"], "vegan");

        let (request, key) = provider.seen.lock().unwrap().take().unwrap();
        assert_eq!(key, "sk-valid");
        assert!(request.messages[1].content.contains("no animal products"));
    }

    #[tokio::test]
    async fn test_unrecognized_diet_falls_back_but_echoes() {
        let provider = Arc::new(MockProvider::replying("Recipe Name: Steak..."));
        let state = state_with(provider.clone());

        let response = generate_recipe(
            State(state),
            Json(RecipeRequest {
                diet_type: "keto".to_string(),
                api_key: "sk-valid".to_string(),
            }),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["diet_type"], "keto");

        let (request, _) = provider.seen.lock().unwrap().take().unwrap();
        assert!(
            request.messages[1]
                .content
                .contains("with no dietary restrictions")
        );
        assert!(!request.messages[1].content.contains("keto"));
    }

    #[tokio::test]
    async fn test_provider_failure_collapses_to_500() {
        let provider = Arc::new(MockProvider::failing(|| {
            ProviderError::Authentication("Invalid API key.".to_string())
        }));
        let state = state_with(provider);

        let response = generate_recipe(
            State(state),
            Json(RecipeRequest {
                diet_type: "vegan".to_string(),
                api_key: String::new(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error generating recipe: "));
        assert!(detail.contains("Invalid API key."));
    }

    #[tokio::test]
    async fn test_empty_choices_is_a_generation_failure() {
        struct EmptyProvider;

        #[async_trait]
        impl Provider for EmptyProvider {
            async fn create_chat_completion(
                &self,
                _request: &ChatCompletionRequest,
                _api_key: &str,
            ) -> Result<ChatCompletionResponse, ProviderError> {
                Ok(ChatCompletionResponse {
                    id: None,
                    choices: vec![],
                    usage: None,
                })
            }

            fn provider_name(&self) -> &str {
                "Empty"
            }
        }

        let request = RecipeRequest {
            diet_type: "vegan".to_string(),
            api_key: "sk-valid".to_string(),
        };
        let result = run_generation(&EmptyProvider, "gpt-4o", &request).await;
        assert!(matches!(result, Err(ProviderError::Unexpected(_))));
    }

    #[tokio::test]
    async fn test_index_serves_asset_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let page = "<html><body>Diet Recipe Generator</body></html>";
        std::fs::write(dir.path().join("index.html"), page).unwrap();

        let mut state = state_with(Arc::new(MockProvider::replying("unused")));
        state.static_dir = dir.path().to_path_buf();

        let response = index(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], page.as_bytes());
    }

    #[tokio::test]
    async fn test_index_missing_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(Arc::new(MockProvider::replying("unused")));
        state.static_dir = dir.path().to_path_buf();

        let response = index(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
