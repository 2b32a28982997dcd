/*
[INPUT]:  Test scenarios needing a running timer coordinator or fetch session
[OUTPUT]: Shared harness helpers for editor integration tests
[POS]:    Integration test support
[UPDATE]: When coordinator or session construction changes
*/

#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use todo_timer_editor::action::Action;
use todo_timer_editor::config::TimerConfig;
use todo_timer_editor::coordinator::{CoordinatorPhase, TimerCoordinator};
use todo_timer_editor::prompt::ConfirmPrompt;
use todo_timer_editor::store::{ActionStream, Store};

pub struct Harness {
    pub store: Store,
    pub actions: ActionStream,
    pub phase: watch::Receiver<CoordinatorPhase>,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    /// Store + coordinator; the action log starts empty.
    pub fn start(config: TimerConfig, prompt: Arc<dyn ConfirmPrompt>) -> Self {
        let store = Store::new();
        let actions = store.subscribe();
        let shutdown = CancellationToken::new();
        let coordinator = TimerCoordinator::new(store.clone(), prompt, config, shutdown.clone());
        let phase = coordinator.phase();
        let handle = coordinator.spawn();
        Self {
            store,
            actions,
            phase,
            shutdown,
            handle,
        }
    }

    pub async fn wait_for_phase(&mut self, expected: CoordinatorPhase) {
        self.phase
            .wait_for(|phase| *phase == expected)
            .await
            .expect("coordinator phase channel closed");
    }

    /// Every action dispatched since the last drain.
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.actions.try_recv() {
            actions.push(action);
        }
        actions
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        self.handle
            .await
            .expect("coordinator join")
            .expect("coordinator result");
    }
}

pub fn timer_config(duration_secs: u32) -> TimerConfig {
    TimerConfig {
        duration_secs,
        ..TimerConfig::default()
    }
}

pub fn ticks(count: usize) -> Vec<Action> {
    vec![Action::TimerTick; count]
}
