#![deny(missing_docs)]

//! Core library for the student records service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Activity counters exposed over HTTP.
pub mod metrics;
/// Student record types shared across layers.
pub mod model;
/// Concurrent in-memory student store.
pub mod repository;
/// Service layer tying validation, storage, and summaries together.
pub mod service;
/// Text-generation client used for student summaries.
pub mod summarization;
/// Field-level checks applied to incoming student payloads.
pub mod validation;
