//! API data models
//!
//! This module contains data structures for the recipe API surface and the
//! OpenAI chat-completion wire format.

pub mod api;
pub mod openai;
