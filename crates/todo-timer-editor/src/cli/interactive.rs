/*
[INPUT]:  Editor store, prompt requests, user input via CLI
[OUTPUT]: Store dispatches from a menu-driven loop; answered timeout prompts
[POS]:    CLI interactive flow
[UPDATE]: When adding menu entries or changing how drafts map to typing actions
[UPDATE]: 2026-10-11 Run dialoguer prompts on the blocking pool so the countdown keeps ticking
[UPDATE]: 2026-10-16 Keep the draft when a timeout prompt is answered with keep
*/

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use todo_timer_editor::action::Action;
use todo_timer_editor::draft::{EpochWatch, SubmitRefusal, submit_actions, typing_transition};
use todo_timer_editor::model::{FetchStatus, Filter, TodoId};
use todo_timer_editor::prompt::PromptRequest;
use todo_timer_editor::store::{AppState, Store};

const FETCH_WAIT: Duration = Duration::from_secs(45);

const MENU: [&str; 9] = [
    "Add todo",
    "Toggle todo",
    "Remove todo",
    "Clear completed",
    "Set filter",
    "Toggle timer mode",
    "Load sample",
    "Show list",
    "Exit",
];

/// Run a dialoguer prompt off the async thread.
async fn blocking<T, F>(prompt: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&ColorfulTheme) -> dialoguer::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || prompt(&ColorfulTheme::default()))
        .await
        .context("prompt task failed")?
        .context("read user input")
}

pub async fn run_interactive(
    store: Store,
    mut prompts: mpsc::UnboundedReceiver<PromptRequest>,
    shutdown: CancellationToken,
) -> Result<()> {
    println!("{}", style("todo-timer").bold().cyan());

    loop {
        answer_pending_prompts(&mut prompts).await?;
        println!("{}", style(status_line(&store.snapshot())).dim());

        let selection = tokio::select! {
            _ = shutdown.cancelled() => break,
            selection = blocking(|theme| {
                Select::with_theme(theme)
                    .with_prompt("Select action")
                    .items(&MENU)
                    .default(0)
                    .interact()
            }) => selection?,
        };

        match selection {
            0 => add_todo(&store, &mut prompts).await?,
            1 => {
                if let Some(id) = pick_todo(&store, "Toggle which todo?").await? {
                    store.dispatch(Action::Toggle(id));
                }
            }
            2 => {
                if let Some(id) = pick_todo(&store, "Remove which todo?").await? {
                    store.dispatch(Action::Remove(id));
                    println!("{}", style("Removed.").green());
                }
            }
            3 => clear_completed(&store),
            4 => set_filter(&store).await?,
            5 => toggle_timer_mode(&store),
            6 => load_sample(&store).await,
            7 => print_todos(&store.snapshot()),
            _ => break,
        }
    }

    Ok(())
}

async fn answer_pending_prompts(prompts: &mut mpsc::UnboundedReceiver<PromptRequest>) -> Result<()> {
    while let Ok(request) = prompts.try_recv() {
        let message = request.message.clone();
        let discard = blocking(move |theme| {
            Confirm::with_theme(theme)
                .with_prompt(message)
                .default(false)
                .interact()
        })
        .await?;
        if let Err(err) = request.answer(discard) {
            warn!(error = %err, "prompt answer not delivered");
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DraftOutcome {
    Added,
    Empty,
    Discarded,
    /// Time ran out and the user kept the draft; it goes back into the input.
    Kept(String),
}

/// Entering the prompt counts as typing; leaving it ends the draft one way or another.
async fn add_todo(
    store: &Store,
    prompts: &mut mpsc::UnboundedReceiver<PromptRequest>,
) -> Result<()> {
    let mut epoch = store.read(EpochWatch::new);
    let mut initial = String::new();

    loop {
        let timer = store.read(|state| state.timer);
        if timer.mode && !timer.is_typing {
            store.dispatch(Action::TypingStarted);
            println!("{}", style("Timer mode is on: the clock is running.").yellow());
        }

        let draft: String = blocking(move |theme| {
            Input::<String>::with_theme(theme)
                .with_prompt("New todo")
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        // A timeout that fired while the input was open is answered before the draft is used.
        answer_pending_prompts(prompts).await?;

        match settle_draft(store, &mut epoch, draft) {
            DraftOutcome::Added => println!("{}", style("Added.").green()),
            DraftOutcome::Empty => println!("{}", style("Nothing added.").dim()),
            DraftOutcome::Discarded => println!("{}", style("Draft discarded.").red()),
            DraftOutcome::Kept(draft) => {
                println!(
                    "{}",
                    style("Draft kept. Edit it and press Enter; the clock starts again.").yellow()
                );
                initial = draft;
                continue;
            }
        }
        return Ok(());
    }
}

/// Dispatch whatever the finished input implies.
///
/// A kept draft ends the expired typing session so that reopening the input starts a
/// fresh countdown.
fn settle_draft(store: &Store, epoch: &mut EpochWatch, draft: String) -> DraftOutcome {
    if store.read(|state| epoch.reset_requested(state)) {
        return DraftOutcome::Discarded;
    }

    match store.read(|state| submit_actions(&draft, state)) {
        Ok(actions) => {
            for action in actions {
                store.dispatch(action);
            }
            DraftOutcome::Added
        }
        Err(refusal) => {
            if let Some(action) = store.read(|state| typing_transition("", state)) {
                store.dispatch(action);
            }
            match refusal {
                SubmitRefusal::Empty => DraftOutcome::Empty,
                SubmitRefusal::TimeIsUp => DraftOutcome::Kept(draft),
            }
        }
    }
}

async fn pick_todo(store: &Store, prompt: &'static str) -> Result<Option<TodoId>> {
    let (ids, labels): (Vec<TodoId>, Vec<String>) = store.read(|state| {
        state
            .visible_items()
            .map(|item| (item.id.clone(), todo_label(item.completed, &item.title)))
            .unzip()
    });
    if ids.is_empty() {
        println!("{}", style("No todos.").yellow());
        return Ok(None);
    }

    let selection = blocking(move |theme| {
        Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
    })
    .await?;
    Ok(selection.and_then(|index| ids.get(index).cloned()))
}

fn clear_completed(store: &Store) {
    let completed = store.read(|state| state.completed_count());
    if completed == 0 {
        println!("{}", style("Nothing to clear.").yellow());
        return;
    }
    store.dispatch(Action::ClearCompleted);
    println!("{}", style(format!("Cleared {completed} completed.")).green());
}

async fn set_filter(store: &Store) -> Result<()> {
    let current = store.read(|state| state.filter);
    let default = Filter::ALL
        .iter()
        .position(|filter| *filter == current)
        .unwrap_or(0);
    let labels: Vec<&'static str> = Filter::ALL.iter().map(|filter| filter.label()).collect();

    let selection = blocking(move |theme| {
        Select::with_theme(theme)
            .with_prompt("Filter")
            .items(&labels)
            .default(default)
            .interact()
    })
    .await?;
    if let Some(filter) = Filter::ALL.get(selection) {
        store.dispatch(Action::SetFilter(*filter));
    }
    Ok(())
}

fn toggle_timer_mode(store: &Store) {
    store.dispatch(Action::ToggleTimerMode);
    let mode = store.read(|state| state.timer.mode);
    println!(
        "{}",
        style(format!("Timer mode {}.", if mode { "on" } else { "off" })).cyan()
    );
}

async fn load_sample(store: &Store) {
    if store.read(|state| state.fetch.status) == FetchStatus::Loading {
        println!("{}", style("Already loading.").yellow());
        return;
    }
    let mut state_rx = store.watch();
    store.dispatch(Action::FetchRequested);
    println!("{}", style("Loading sample...").dim());

    let settled = tokio::time::timeout(FETCH_WAIT, async {
        state_rx
            .wait_for(|state| state.fetch.status != FetchStatus::Loading)
            .await
            .is_ok()
    })
    .await
    .unwrap_or(false);
    if !settled {
        debug!("stopped waiting for sample load");
        println!("{}", style("Still loading; check back with 'Show list'.").yellow());
        return;
    }

    let state = store.snapshot();
    match state.fetch.status {
        FetchStatus::Failed => println!(
            "{}",
            style(format!(
                "Load failed: {}",
                state.fetch.error.as_deref().unwrap_or("unknown error")
            ))
            .red()
        ),
        _ => println!(
            "{}",
            style(format!("Loaded {} todos.", state.items.len())).green()
        ),
    }
}

fn print_todos(state: &AppState) {
    println!("{}", style(format!("Todos ({})", state.filter)).bold());
    let lines = todo_lines(state);
    if lines.is_empty() {
        println!("  {}", style("Nothing here yet.").dim());
    }
    for (completed, line) in lines {
        if completed {
            println!("  {}", style(line).dim());
        } else {
            println!("  {line}");
        }
    }
    if let (FetchStatus::Failed, Some(error)) = (state.fetch.status, state.fetch.error.as_deref()) {
        println!("  {}", style(format!("Error: {error}")).red());
    }
}

fn todo_label(completed: bool, title: &str) -> String {
    format!("[{}] {title}", if completed { "x" } else { " " })
}

fn todo_lines(state: &AppState) -> Vec<(bool, String)> {
    state
        .visible_items()
        .map(|item| (item.completed, todo_label(item.completed, &item.title)))
        .collect()
}

fn status_line(state: &AppState) -> String {
    let timer = &state.timer;
    let mut line = format!(
        "{} left, {} done | filter: {} | timer mode: {}",
        state.active_count(),
        state.completed_count(),
        state.filter,
        if timer.mode { "on" } else { "off" },
    );
    if timer.mode && timer.is_typing {
        line.push_str(&format!(" | time left: {}s", timer.remaining_seconds));
    }
    line
}
