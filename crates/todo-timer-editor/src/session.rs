/*
[INPUT]:  TimerConfig, TodoSource, ConfirmPrompt, shutdown CancellationToken
[OUTPUT]: Running store + timer coordinator + fetch worker with supervised shutdown
[POS]:    Execution layer - wires the background tasks a front end talks to
[UPDATE]: When adding background tasks or changing shutdown guarantees
*/

use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::action::Action;
use crate::config::TimerConfig;
use crate::coordinator::{CoordinatorPhase, TimerCoordinator};
use crate::fetch::{FetchWorker, TodoSource};
use crate::prompt::ConfirmPrompt;
use crate::store::Store;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

static PANIC_HOOK_ONCE: Once = Once::new();

fn ensure_panic_hook_installed() {
    PANIC_HOOK_ONCE.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!("panic in background task: {info}");
            previous(info);
        }));
    });
}

#[derive(Debug)]
struct ManagedTask {
    name: &'static str,
    handle: JoinHandle<Result<()>>,
}

/// One editor instance: a store plus the tasks reacting to it.
#[derive(Debug)]
pub struct EditorSession {
    store: Store,
    phase: watch::Receiver<CoordinatorPhase>,
    shutdown: CancellationToken,
    tasks: Vec<ManagedTask>,
}

impl EditorSession {
    /// Spawn the coordinator and fetch worker. Must be called inside a tokio runtime.
    pub fn start(
        config: &TimerConfig,
        source: Arc<dyn TodoSource>,
        prompt: Arc<dyn ConfirmPrompt>,
        shutdown: CancellationToken,
    ) -> Self {
        Self::start_with_store(Store::new(), config, source, prompt, shutdown)
    }

    pub fn start_with_store(
        store: Store,
        config: &TimerConfig,
        source: Arc<dyn TodoSource>,
        prompt: Arc<dyn ConfirmPrompt>,
        shutdown: CancellationToken,
    ) -> Self {
        ensure_panic_hook_installed();

        let coordinator =
            TimerCoordinator::new(store.clone(), prompt, config.clone(), shutdown.clone());
        let phase = coordinator.phase();
        let fetcher = FetchWorker::new(store.clone(), source, shutdown.clone());

        let tasks = vec![
            ManagedTask {
                name: "timer-coordinator",
                handle: coordinator.spawn(),
            },
            ManagedTask {
                name: "fetch-worker",
                handle: fetcher.spawn(),
            },
        ];

        if config.start_enabled && !store.read(|state| state.timer.mode) {
            store.dispatch(Action::ToggleTimerMode);
        }
        info!(timer_mode = config.start_enabled, "editor session started");

        Self {
            store,
            phase,
            shutdown,
            tasks,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn phase(&self) -> watch::Receiver<CoordinatorPhase> {
        self.phase.clone()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub async fn shutdown_and_wait(&mut self) -> Result<()> {
        self.shutdown.cancel();
        self.join_all_with_deadline(SHUTDOWN_TIMEOUT).await
    }

    async fn join_all_with_deadline(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut tasks = std::mem::take(&mut self.tasks);

        while let Some(task) = tasks.pop() {
            let ManagedTask { name, mut handle } = task;
            tokio::select! {
                res = &mut handle => {
                    match res {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => {
                            abort_all(tasks);
                            return Err(err).with_context(|| format!("task returned error task={name}"));
                        }
                        Err(join_err) => {
                            abort_all(tasks);
                            if join_err.is_panic() {
                                return Err(anyhow!("task panicked task={name}: {join_err}"));
                            }
                            return Err(anyhow!("task join error task={name}: {join_err}"));
                        }
                    }
                }
                _ = tokio::time::sleep_until(deadline) => {
                    warn!(task = name, "shutdown deadline reached; aborting");
                    handle.abort();
                    abort_all(tasks);
                    return Err(anyhow!("shutdown timed out after {timeout:?}"));
                }
            }
        }

        info!("editor session stopped");
        Ok(())
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
        abort_all(std::mem::take(&mut self.tasks));
    }
}

fn abort_all(tasks: Vec<ManagedTask>) {
    for task in tasks {
        task.handle.abort();
    }
}
