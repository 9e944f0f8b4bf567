//! Request handlers for the coordinator and agent APIs.

pub mod agents;
pub mod expressions;
pub mod tasks;
pub mod test_helpers;

pub use agents::*;
pub use expressions::*;
pub use tasks::*;
