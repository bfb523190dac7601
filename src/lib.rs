//! Tribunal - Submission Evaluation Orchestrator
//!
//! This library drives the grading of competitive programming submissions.
//! Solutions are executed by an external execution service; Tribunal decides
//! which test cases to run, interprets each outcome, stops at the first
//! failing case, aggregates metrics and persists the final verdict.
//!
//! # Features
//!
//! - Graded submissions over a problem's full test suite
//! - Sample runs against visible cases and one-shot custom-input runs
//! - First-failure short-circuiting with cost accounting
//! - Durable per-case records alongside the final verdict
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Judge**: Evaluation planning, execution and verdict aggregation
//! - **Services**: Read-side business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
