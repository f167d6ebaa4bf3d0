//! Lead Scoring API Library
//!
//! Scores prospect leads against a product offer by combining deterministic
//! rules with a language-model judgment of buying intent.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core scoring logic.
//! - `integrations`: External service integrations.
//! - `classifier`: AI intent classification and response parsing.
//! - `completion_client`: OpenAI-compatible chat completions client.
//! - `composer`: Merges rule and AI results into a final score.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and routes.
//! - `models`: Core data models.
//! - `pipeline`: Batch scoring of leads against an offer.
//! - `rules`: Rule-based lead scoring.
//! - `store`: In-memory state for offers, leads and results.
//! - `upload`: CSV lead decoding.

pub mod api;
pub mod core;
pub mod integrations;

pub mod classifier;
pub mod completion_client;
pub mod composer;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod store;
pub mod upload;
