// Career recommendation engine
// Implements: profile normalization, field classification, guardrails, scoring,
// zone assignment and match reasons. Stateless per call; every table is built once
// at startup and shared read-only.

pub mod classifier;
pub mod engine;
pub mod explainer;
pub mod fields;
pub mod guardrails;
pub mod handlers;
pub mod keyword_matcher;
pub mod normalizer;
pub mod recommender;
pub mod resume_insights;
pub mod scoring;
pub mod settings;
pub mod zones;
