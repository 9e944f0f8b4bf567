//! Request and response models for the HTTP API.

pub mod agents;
pub mod expressions;

// Re-export all models for easier imports
pub use agents::*;
pub use expressions::*;
