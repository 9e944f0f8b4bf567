//! Command-line client for the expression evaluation service.

pub mod api_client;
