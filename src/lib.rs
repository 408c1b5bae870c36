pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{EngineError, ValidationError};
pub use service::{CompositionSession, SessionDeps, SubmissionOrchestrator, SubmitPhase};
