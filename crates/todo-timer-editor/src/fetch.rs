/*
[INPUT]:  fetch_requested actions, TodoSource (HTTP sample endpoint or test double)
[OUTPUT]: fetch_succeeded / fetch_failed dispatches, latest request only
[POS]:    Data layer - remote sample loading with take-latest semantics
[UPDATE]: When changing record normalization or request supersession
[UPDATE]: 2026-10-07 Guard result dispatch on request_seq so stale results are dropped
*/

use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use todo_timer_adapter::{RawTodo, TodoClient, TodoError};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::RemoteConfig;
use crate::model::{TodoId, TodoItem};
use crate::store::{ActionStream, Store};

/// Where sample todos come from.
#[async_trait]
pub trait TodoSource: Send + Sync {
    async fn fetch_todos(&self) -> Result<Vec<RawTodo>, TodoError>;
}

/// Sample data served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoSource {
    client: TodoClient,
    path: String,
}

impl HttpTodoSource {
    pub fn new(client: TodoClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn from_config(remote: &RemoteConfig) -> Result<Self> {
        let client = TodoClient::with_config_and_base_url(remote.client_config(), &remote.base_url)
            .with_context(|| format!("build todo client for {}", remote.base_url))?;
        Ok(Self::new(client, remote.path.clone()))
    }
}

#[async_trait]
impl TodoSource for HttpTodoSource {
    async fn fetch_todos(&self) -> Result<Vec<RawTodo>, TodoError> {
        self.client.fetch_todos(&self.path).await
    }
}

/// Normalize raw records, keeping server order.
///
/// Titles are trimmed and records left without one are skipped. A record without an
/// id gets a fresh one.
pub fn into_todo_items(raw: Vec<RawTodo>) -> Vec<TodoItem> {
    raw.into_iter()
        .filter_map(|record| {
            let title = record.display_title().trim();
            if title.is_empty() {
                debug!(id = %record.id, "skipping todo without title");
                return None;
            }
            let id = match record.id.trim() {
                "" => TodoId::generate(),
                id => TodoId::from(id),
            };
            Some(TodoItem {
                id,
                title: title.to_string(),
                completed: record.completed,
            })
        })
        .collect()
}

/// Serves `FetchRequested` actions.
///
/// Each request supersedes the previous one: the older in-flight fetch is cancelled
/// and its result, should it still arrive, is dropped because `request_seq` moved on.
/// The local generation starts from the store's counter, taken together with the
/// subscription so requests already counted are never counted again.
pub struct FetchWorker {
    store: Store,
    source: Arc<dyn TodoSource>,
    actions: ActionStream,
    shutdown: CancellationToken,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl FetchWorker {
    pub fn new(store: Store, source: Arc<dyn TodoSource>, shutdown: CancellationToken) -> Self {
        let (actions, generation) = store.subscribe_with(|state| state.fetch.request_seq);
        Self {
            store,
            source,
            actions,
            shutdown,
            generation,
            in_flight: None,
        }
    }

    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => None,
                action = self.actions.recv() => action,
            };
            match next {
                Some(Action::FetchRequested) => self.start_fetch(),
                Some(_) => {}
                None => break,
            }
        }

        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        debug!("fetch worker stopped");
        Ok(())
    }

    fn start_fetch(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        let token = self.shutdown.child_token();
        if let Some(previous) = self.in_flight.replace(token.clone()) {
            previous.cancel();
            debug!(generation, "superseded in-flight fetch");
        }

        let store = self.store.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(generation, "fetch cancelled");
                    return;
                }
                result = source.fetch_todos() => result,
            };

            let action = match result {
                Ok(raw) => {
                    let items = into_todo_items(raw);
                    info!(generation, count = items.len(), "sample todos loaded");
                    Action::FetchSucceeded(items)
                }
                Err(err) => {
                    warn!(generation, error = %err, "sample fetch failed");
                    Action::FetchFailed(err.to_string())
                }
            };

            if !store.dispatch_if(|state| state.fetch.request_seq == generation, action) {
                debug!(generation, "stale fetch result dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchStatus;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn raw(id: &str, title: &str) -> RawTodo {
        RawTodo {
            id: id.to_string(),
            title: Some(title.to_string()),
            text: None,
            completed: false,
        }
    }

    /// Replies in call order, each after its own delay.
    struct DelayedSource {
        replies: Mutex<VecDeque<(Duration, Result<Vec<RawTodo>, TodoError>)>>,
    }

    impl DelayedSource {
        fn new(replies: Vec<(Duration, Result<Vec<RawTodo>, TodoError>)>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl TodoSource for DelayedSource {
        async fn fetch_todos(&self) -> Result<Vec<RawTodo>, TodoError> {
            let (delay, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch");
            tokio::time::sleep(delay).await;
            reply
        }
    }

    fn titles(store: &Store) -> Vec<String> {
        store.read(|state| state.items.iter().map(|item| item.title.clone()).collect())
    }

    #[test]
    fn normalizes_records() {
        let items = into_todo_items(vec![
            raw("1", "  Buy milk "),
            RawTodo {
                id: "2".to_string(),
                title: None,
                text: Some("From text".to_string()),
                completed: true,
            },
            raw("3", "   "),
            raw("", "No id"),
        ]);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], TodoItem::new("1", "Buy milk"));
        assert_eq!(items[1].title, "From text");
        assert!(items[1].completed);
        assert_eq!(items[2].title, "No id");
        assert!(!items[2].id.as_str().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn later_request_wins_when_it_finishes_first() {
        let store = Store::new();
        let source = DelayedSource::new(vec![
            (Duration::from_secs(5), Ok(vec![raw("a", "first")])),
            (Duration::from_secs(1), Ok(vec![raw("b", "second")])),
        ]);
        let shutdown = CancellationToken::new();
        let mut actions = store.subscribe();
        let handle = FetchWorker::new(store.clone(), source, shutdown.clone()).spawn();

        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_millis(100)).await;
        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(titles(&store), vec!["second"]);
        assert_eq!(store.read(|state| state.fetch.status), FetchStatus::Succeeded);

        let mut successes = 0;
        while let Ok(action) = actions.try_recv() {
            if matches!(action, Action::FetchSucceeded(_)) {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);

        shutdown.cancel();
        handle.await.expect("join").expect("worker");
    }

    #[tokio::test(start_paused = true)]
    async fn later_request_wins_when_it_finishes_last() {
        let store = Store::new();
        let source = DelayedSource::new(vec![
            (Duration::from_secs(1), Ok(vec![raw("a", "first")])),
            (Duration::from_secs(3), Ok(vec![raw("b", "second")])),
        ]);
        let shutdown = CancellationToken::new();
        let handle = FetchWorker::new(store.clone(), source, shutdown.clone()).spawn();

        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_millis(500)).await;
        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_secs(1)).await;
        // The first reply would have landed by now; it was superseded.
        assert!(titles(&store).is_empty());
        assert_eq!(store.read(|state| state.fetch.status), FetchStatus::Loading);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(titles(&store), vec!["second"]);

        shutdown.cancel();
        handle.await.expect("join").expect("worker");
    }

    #[tokio::test(start_paused = true)]
    async fn worker_started_after_earlier_requests_applies_next_result() {
        let store = Store::new();
        store.dispatch(Action::FetchRequested);
        store.dispatch(Action::FetchRequested);
        let source = DelayedSource::new(vec![(Duration::from_secs(1), Ok(vec![raw("c", "third")]))]);
        let shutdown = CancellationToken::new();
        let handle = FetchWorker::new(store.clone(), source, shutdown.clone()).spawn();

        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(store.read(|state| state.fetch.request_seq), 3);
        assert_eq!(store.read(|state| state.fetch.status), FetchStatus::Succeeded);
        assert_eq!(titles(&store), vec!["third"]);

        shutdown.cancel();
        handle.await.expect("join").expect("worker");
    }

    #[tokio::test(start_paused = true)]
    async fn failure_records_message_and_keeps_items() {
        let store = Store::new();
        store.dispatch(Action::add("keep me"));
        let source = DelayedSource::new(vec![(
            Duration::from_secs(1),
            Err(TodoError::Api {
                code: 503,
                message: "unavailable".to_string(),
            }),
        )]);
        let shutdown = CancellationToken::new();
        let worker = FetchWorker::new(store.clone(), source, shutdown.clone());
        let handle = worker.spawn();

        store.dispatch(Action::FetchRequested);
        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = store.snapshot();
        assert_eq!(state.fetch.status, FetchStatus::Failed);
        assert_eq!(
            state.fetch.error.as_deref(),
            Some("API error (code 503): unavailable")
        );
        assert_eq!(titles(&store), vec!["keep me"]);

        shutdown.cancel();
        handle.await.expect("join").expect("worker");
    }

    #[tokio::test]
    async fn http_source_reads_sample_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todo.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "Walk dog", "completed": true},
                {"id": "x", "text": "Call mom"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let remote = RemoteConfig {
            base_url: server.uri(),
            ..RemoteConfig::default()
        };
        let source = HttpTodoSource::from_config(&remote).expect("source");
        let items = into_todo_items(source.fetch_todos().await.expect("fetch"));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "1");
        assert!(items[0].completed);
        assert_eq!(items[1].title, "Call mom");
    }
}
