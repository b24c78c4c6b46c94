//! Google Gemini API client.
//!
//! Implements the `ModelClient` trait for Gemini models via the
//! Generative Language API.

mod api;
mod client;
mod config;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_API_BASE};

#[cfg(test)]
mod tests;
