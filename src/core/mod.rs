//! Core application modules
//!
//! This module contains configuration, logging, prompt construction, asset
//! resolution, and the provider client.

pub mod assets;
pub mod client;
pub mod config;
pub mod logging;
pub mod prompt;
pub mod provider;
