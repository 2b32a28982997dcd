/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for todo-timer-adapter tests

use todo_timer_adapter::{ClientConfig, TodoClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> TodoClient {
    TodoClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Sample payload in the shape the bundled `todo.json` uses
pub fn sample_payload() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "title": "Learn Redux-free state", "completed": false },
        { "id": 2, "text": "Build a todo app", "completed": true },
        { "id": "3", "title": "Ship it" }
    ])
}
