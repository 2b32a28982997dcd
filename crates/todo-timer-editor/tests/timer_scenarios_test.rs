/*
[INPUT]:  Timer coordinator driven by dispatched actions under virtual time
[OUTPUT]: Action-log and state verification for countdown races
[POS]:    Integration test layer - timer mode scenarios
[UPDATE]: When changing wake conditions, stop signals, or timeout resolution
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Harness, ticks, timer_config};
use todo_timer_editor::action::Action;
use todo_timer_editor::coordinator::CoordinatorPhase;
use todo_timer_editor::draft::submit_actions;
use todo_timer_editor::prompt::{ChannelPrompt, ScriptedPrompt};

fn concat(parts: Vec<Vec<Action>>) -> Vec<Action> {
    parts.into_iter().flatten().collect()
}

#[tokio::test(start_paused = true)]
async fn typing_stopped_cancels_countdown() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(true)));

    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);
    harness.wait_for_phase(CoordinatorPhase::Counting).await;

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(harness.store.read(|state| state.timer.remaining_seconds), 55);

    harness.store.dispatch(Action::TypingStopped);
    harness.wait_for_phase(CoordinatorPhase::Idle).await;

    let timer = harness.store.read(|state| state.timer);
    assert_eq!(timer.remaining_seconds, 0);
    assert!(!timer.is_typing);
    assert_eq!(
        harness.drain(),
        concat(vec![
            vec![
                Action::ToggleTimerMode,
                Action::TypingStarted,
                Action::TimerStarted(60),
            ],
            ticks(5),
            vec![Action::TypingStopped, Action::TimerStopped],
        ])
    );
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn timeout_then_discard_resets_draft() {
    let prompt = Arc::new(ScriptedPrompt::always(true));
    let mut harness = Harness::start(timer_config(60), prompt.clone());

    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);
    tokio::time::sleep(Duration::from_secs(61)).await;

    let timer = harness.store.read(|state| state.timer);
    assert_eq!(timer.draft_reset_epoch, 1);
    assert!(!timer.is_typing);
    assert_eq!(timer.remaining_seconds, 0);
    assert_eq!(prompt.asked().len(), 1);
    assert_eq!(*harness.phase.borrow(), CoordinatorPhase::Idle);

    assert_eq!(
        harness.drain(),
        concat(vec![
            vec![
                Action::ToggleTimerMode,
                Action::TypingStarted,
                Action::TimerStarted(60),
            ],
            ticks(59),
            vec![Action::TimerStopped, Action::DraftResetRequested],
        ])
    );
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn timeout_then_keep_leaves_typing_on() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(false)));

    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);
    tokio::time::sleep(Duration::from_secs(61)).await;

    let timer = harness.store.read(|state| state.timer);
    assert!(timer.is_typing);
    assert_eq!(timer.remaining_seconds, 0);
    assert_eq!(timer.draft_reset_epoch, 0);
    assert!(timer.time_is_up());

    let log = harness.drain();
    assert_eq!(
        &log[log.len() - 2..],
        &[Action::TimerStopped, Action::TimerStopped]
    );
    assert!(!log.contains(&Action::DraftResetRequested));
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn typing_with_mode_off_is_a_spurious_wake() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(true)));

    harness.store.dispatch(Action::TypingStarted);
    tokio::time::sleep(Duration::from_secs(90)).await;

    assert_eq!(*harness.phase.borrow(), CoordinatorPhase::Idle);
    assert_eq!(harness.drain(), vec![Action::TypingStarted]);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn disabling_mode_mid_count_stops_countdown() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(true)));

    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);
    harness.wait_for_phase(CoordinatorPhase::Counting).await;
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    harness.store.dispatch(Action::ToggleTimerMode);
    harness.wait_for_phase(CoordinatorPhase::Idle).await;
    tokio::time::sleep(Duration::from_secs(120)).await;

    let timer = harness.store.read(|state| state.timer);
    assert!(!timer.mode);
    assert!(!timer.is_typing);
    assert_eq!(timer.remaining_seconds, 0);

    let log = harness.drain();
    assert_eq!(
        &log[log.len() - 2..],
        &[Action::ToggleTimerMode, Action::TimerStopped]
    );
    assert_eq!(log.iter().filter(|a| **a == Action::TimerTick).count(), 3);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn add_and_fetch_are_stop_signals() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(true)));
    harness.store.dispatch(Action::ToggleTimerMode);

    for stop in [Action::add("submitted"), Action::FetchRequested] {
        harness.store.dispatch(Action::TypingStarted);
        harness.wait_for_phase(CoordinatorPhase::Counting).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        harness.store.dispatch(stop.clone());
        harness.wait_for_phase(CoordinatorPhase::Idle).await;
        assert_eq!(harness.store.read(|state| state.timer.remaining_seconds), 0);

        let log = harness.drain();
        assert_eq!(log.last(), Some(&Action::TimerStopped));
        harness.store.dispatch(Action::TypingStopped);
    }
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn retyping_starts_a_fresh_countdown() {
    let mut harness = Harness::start(timer_config(10), Arc::new(ScriptedPrompt::always(true)));
    harness.store.dispatch(Action::ToggleTimerMode);

    harness.store.dispatch(Action::TypingStarted);
    tokio::time::sleep(Duration::from_millis(4_500)).await;
    harness.store.dispatch(Action::TypingStopped);
    harness.wait_for_phase(CoordinatorPhase::Idle).await;

    harness.store.dispatch(Action::TypingStarted);
    harness.wait_for_phase(CoordinatorPhase::Counting).await;
    assert_eq!(harness.store.read(|state| state.timer.remaining_seconds), 10);

    let started = harness
        .drain()
        .into_iter()
        .filter(|action| matches!(action, Action::TimerStarted(_)))
        .count();
    assert_eq!(started, 2);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn submit_stays_open_until_the_prompt_appears() {
    let (prompt, mut requests) = ChannelPrompt::new();
    let mut harness = Harness::start(timer_config(30), Arc::new(prompt));
    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);

    tokio::time::sleep(Duration::from_millis(29_500)).await;
    assert_eq!(*harness.phase.borrow(), CoordinatorPhase::Counting);
    assert_eq!(harness.store.read(|state| state.timer.remaining_seconds), 1);
    assert!(
        harness
            .store
            .read(|state| submit_actions("draft", state))
            .is_ok()
    );

    // The countdown reaches zero only once the prompt is already up.
    let request = requests.recv().await.expect("prompt request");
    harness.wait_for_phase(CoordinatorPhase::Confirming).await;
    let timer = harness.store.read(|state| state.timer);
    assert_eq!(timer.remaining_seconds, 0);
    assert!(timer.time_is_up());

    request.answer(false).expect("answer");
    harness.wait_for_phase(CoordinatorPhase::Idle).await;
    let ticks_seen = harness
        .drain()
        .into_iter()
        .filter(|action| *action == Action::TimerTick)
        .count();
    assert_eq!(ticks_seen, 29);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_while_counting_runs_cleanup() {
    let mut harness = Harness::start(timer_config(60), Arc::new(ScriptedPrompt::always(true)));
    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);
    harness.wait_for_phase(CoordinatorPhase::Counting).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    let store = harness.store.clone();
    harness.drain();
    let mut actions = store.subscribe();
    harness.stop().await;

    assert_eq!(store.read(|state| state.timer.remaining_seconds), 0);
    assert_eq!(actions.try_recv().ok(), Some(Action::TimerStopped));
}

#[tokio::test(start_paused = true)]
async fn shutdown_while_confirming_exits() {
    let (prompt, mut requests) = ChannelPrompt::new();
    let mut harness = Harness::start(timer_config(5), Arc::new(prompt));
    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);

    harness.wait_for_phase(CoordinatorPhase::Confirming).await;
    let request = requests.recv().await.expect("prompt request");
    assert_eq!(request.message, timer_config(5).prompt_message);

    harness.stop().await;
    assert!(request.answer(true).is_err());
}

#[tokio::test(start_paused = true)]
async fn channel_prompt_answer_resolves_timeout() {
    let (prompt, mut requests) = ChannelPrompt::new();
    let mut harness = Harness::start(timer_config(5), Arc::new(prompt));
    harness.store.dispatch(Action::ToggleTimerMode);
    harness.store.dispatch(Action::TypingStarted);

    let request = requests.recv().await.expect("prompt request");
    // Actions keep flowing while the prompt is open.
    harness.store.dispatch(Action::add("unrelated"));
    request.answer(true).expect("answer");
    harness.wait_for_phase(CoordinatorPhase::Idle).await;

    assert_eq!(harness.store.read(|state| state.timer.draft_reset_epoch), 1);
    assert_eq!(harness.store.read(|state| state.items.len()), 1);
    harness.stop().await;
}
