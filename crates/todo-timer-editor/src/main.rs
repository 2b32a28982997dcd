/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Running todo editor (TUI or menu CLI) with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_timer_editor::config::default_config_path;
use todo_timer_editor::fetch::HttpTodoSource;
use todo_timer_editor::prompt::ChannelPrompt;
use todo_timer_editor::{EditorConfig, EditorSession};

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "todo-timer", version, about = "Todo list editor with a typing countdown")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[arg(long = "mode", value_enum, default_value_t = Mode::Tui)]
    mode: Mode,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Tui,
    Cli,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a configuration file interactively
    Init {
        #[arg(long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = args.command {
        init_tracing(&args.log_level, None)?;
        let output = output
            .or_else(default_config_path)
            .context("no config directory available; pass --output")?;
        return cli::init::run_init(output);
    }

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let capture_logs = args.mode == Mode::Tui && !args.dry_run;
    init_tracing(&args.log_level, capture_logs.then(|| log_buffer.clone()))?;

    info!(
        config_path = ?args.config_path,
        mode = ?args.mode,
        dry_run = args.dry_run,
        "starting todo-timer"
    );

    let config =
        EditorConfig::load(args.config_path.as_deref()).context("load config")?;
    info!(
        duration_secs = config.timer.duration_secs,
        base_url = %config.remote.base_url,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let source = HttpTodoSource::from_config(&config.remote).context("build sample source")?;
    let (prompt, prompt_requests) = ChannelPrompt::new();
    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let mut session = EditorSession::start(
        &config.timer,
        Arc::new(source),
        Arc::new(prompt),
        shutdown.clone(),
    );
    let store = session.store().clone();

    let result = match args.mode {
        Mode::Tui => tui::run_tui(store, prompt_requests, log_buffer, shutdown.clone()).await,
        Mode::Cli => {
            cli::interactive::run_interactive(store, prompt_requests, shutdown.clone()).await
        }
    };
    info!("front end exited");

    session
        .shutdown_and_wait()
        .await
        .context("shutdown editor session")?;
    result
}

fn init_tracing(log_level: &str, capture: Option<LogBufferHandle>) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match capture {
        Some(buffer) => builder
            .with_ansi(false)
            .with_writer(LogWriterFactory::new(buffer))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|err| anyhow!(err))
    .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tui_mode() {
        let cli = Cli::try_parse_from(["todo-timer"]).expect("parse");
        assert_eq!(cli.mode, Mode::Tui);
        assert_eq!(cli.log_level, "info");
        assert!(cli.config_path.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_cli_mode_and_init() {
        let cli = Cli::try_parse_from(["todo-timer", "--mode", "cli", "--dry-run"]).expect("parse");
        assert_eq!(cli.mode, Mode::Cli);
        assert!(cli.dry_run);

        let cli = Cli::try_parse_from(["todo-timer", "init", "--output", "/tmp/x.yaml"])
            .expect("parse");
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, Some(PathBuf::from("/tmp/x.yaml")))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["todo-timer", "--mode", "gui"]).is_err());
    }
}
