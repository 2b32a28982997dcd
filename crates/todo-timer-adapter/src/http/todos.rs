/*
[INPUT]:  Sample-data endpoint path
[OUTPUT]: Raw todo records as served by the remote
[POS]:    HTTP layer - sample data endpoint (no auth required)
[UPDATE]: When the sample-data route or payload changes
*/

use crate::http::{Result, TodoClient};
use crate::types::RawTodo;
use reqwest::Method;

/// Route of the bundled sample list
pub const DEFAULT_SAMPLE_PATH: &str = "/todo.json";

impl TodoClient {
    /// Fetch the sample todo list
    ///
    /// GET {path}
    pub async fn fetch_todos(&self, path: &str) -> Result<Vec<RawTodo>> {
        let builder = self
            .request(Method::GET, path)?
            .header(reqwest::header::ACCEPT, "application/json");
        let todos: Vec<RawTodo> = self.send_json(builder).await?;
        tracing::debug!(path, count = todos.len(), "fetched raw todos");
        Ok(todos)
    }
}
