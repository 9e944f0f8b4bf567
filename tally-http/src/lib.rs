//! # Tally HTTP Services
//!
//! HTTP surfaces for the tally distributed expression evaluation system:
//!
//! * the **coordinator** ([`server::start_coordinator_server`]): accepts
//!   expressions, registers agents, and answers status/result polling;
//! * the **agent** ([`server::start_agent_server`]): evaluates the tasks
//!   the coordinator posts to it.
//!
//! Both servers are assembled from the routers in [`routes`], with request
//! handlers in [`handlers`], request/response models in [`models`], and a
//! shared error-to-response mapping in [`error`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
