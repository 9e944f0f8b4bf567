//! Shared helpers for handler and route tests.

use std::time::Duration;

use crate::server::AppState;
use tally_core::agent_registry::AgentRegistry;
use tally_core::config::DispatchConfig;
use tally_core::dispatcher::Dispatcher;
use tally_core::expression_store::ExpressionStore;

/// Create an AppState with default dispatch settings for tests.
pub fn create_test_state() -> AppState {
    create_test_state_with_timeout(Duration::from_secs(5))
}

/// Create an AppState with a specific dispatch timeout for tests.
pub fn create_test_state_with_timeout(request_timeout: Duration) -> AppState {
    let store = ExpressionStore::new();
    let registry = AgentRegistry::new();
    let dispatcher = Dispatcher::new(
        store.clone(),
        registry.clone(),
        DispatchConfig { request_timeout },
    );
    AppState {
        store,
        registry,
        dispatcher,
    }
}
