//! Prompt construction for recipe generation
//!
//! This module holds the fixed prompt template, the diet-type lookup, and the
//! generation parameters sent with every provider call. The output structure
//! in the template is a prompt instruction only; the model's response is
//! passed through verbatim and never validated against it.

use crate::models::openai::{ChatCompletionRequest, ChatMessage};

/// System instruction framing the assistant
pub const SYSTEM_PROMPT: &str =
    "You are a helpful cooking assistant who provides simple, tasty recipes.";

/// Sampling temperature for every generation call
pub const TEMPERATURE: f32 = 0.7;

/// Response length cap in tokens
pub const MAX_TOKENS: u32 = 800;

/// Dietary description for the vegetarian diet type
const VEGETARIAN_DESCRIPTION: &str = "vegetarian (no meat, but dairy and eggs are okay)";

/// Dietary description for the vegan diet type
const VEGAN_DESCRIPTION: &str = "vegan (no animal products at all)";

/// Dietary description for unrestricted diets, also the fallback
const NO_RESTRICTIONS_DESCRIPTION: &str = "with no dietary restrictions";

/// Map a diet type to its natural-language description
///
/// Unrecognized values silently fall back to the unrestricted description.
/// This is a policy choice: the caller's string is still echoed back verbatim
/// in the response envelope, only the prompt uses the fallback.
pub fn diet_description(diet_type: &str) -> &'static str {
    match diet_type {
        "vegetarian" => VEGETARIAN_DESCRIPTION,
        "vegan" => VEGAN_DESCRIPTION,
        _ => NO_RESTRICTIONS_DESCRIPTION,
    }
}

/// Build the user prompt for a diet type
pub fn build_prompt(diet_type: &str) -> String {
    format!(
        "Create a simple, delicious dinner recipe that is {}.\n\n\
         Please format the response as follows:\n\
         - Recipe Name: [name]\n\
         - Prep Time: [time]\n\
         - Servings: [number]\n\
         - Ingredients: [list them]\n\
         - Instructions: [numbered steps]\n\n\
         Keep it simple and easy to make!",
        diet_description(diet_type)
    )
}

/// Build the full chat completion request for a diet type
pub fn build_request(model: &str, diet_type: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(diet_type)),
        ],
        temperature: Some(TEMPERATURE),
        max_tokens: Some(MAX_TOKENS),
    }
}
