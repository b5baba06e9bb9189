use anyhow::{Context, Result};
use chatboard::app::{parse_command, AppContext, Host};
use chatboard::config::AppConfig;
use chatboard::displayers;
use chatboard_core::RendererRegistry;
use chatboard_sources::InMemoryMessageLog;
use clap::Parser;
use crossbeam::channel::{self, Receiver};
use log::{error, info, warn};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// chatboard - Scheduled text displays driven by chat and session events
#[derive(Parser, Debug)]
#[command(name = "chatboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON-lines message log to seed the chat history
    #[arg(short = 'm', long = "messages", value_name = "FILE")]
    messages: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// List available display kinds and exit
    #[arg(long = "list-kinds")]
    list_kinds: bool,

    /// Write the default configuration and exit
    #[arg(long = "write-default-config")]
    write_default_config: bool,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting chatboard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut registry = RendererRegistry::new();
    displayers::register_all(&mut registry);

    if cli.list_kinds {
        for kind in registry.list_kinds() {
            println!("{}", kind);
        }
        return Ok(());
    }

    if cli.write_default_config {
        let config = AppConfig::with_default_displays();
        let path = match &cli.config {
            Some(path) => {
                config.save_to_path(path)?;
                path.clone()
            }
            None => config.save()?,
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let message_log = cli.messages.as_ref().or(config.message_log.as_ref());
    let messages = match message_log {
        Some(path) => InMemoryMessageLog::load_jsonl(path)
            .with_context(|| format!("Failed to load messages from {}", path.display()))?,
        None => InMemoryMessageLog::new(),
    };
    info!("Loaded {} message(s)", messages.len());

    let host = Host::new(&config, &registry, Arc::new(messages))?;
    let summary = host.start()?;
    info!("Startup: {:?}", summary);

    let result = event_loop(&host, Duration::from_millis(config.tick_ms));
    host.shutdown();
    result
}

/// Read commands from stdin until `/quit` or EOF, printing board changes
/// every tick
fn event_loop(host: &Host, tick: Duration) -> Result<()> {
    let lines = spawn_stdin_reader()?;
    let ticker = channel::tick(tick);
    let mut seen = 0;

    print_changes(host.app(), &mut seen)?;
    loop {
        crossbeam::select! {
            recv(lines) -> line => {
                let Ok(line) = line else {
                    info!("Input closed");
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if let ControlFlow::Break(()) = host.handle(command) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("{}", e),
                }
                print_changes(host.app(), &mut seen)?;
            }
            recv(ticker) -> _ => print_changes(host.app(), &mut seen)?,
        }
    }
    print_changes(host.app(), &mut seen)?;
    Ok(())
}

/// Forward stdin lines over a channel. The channel closes at EOF.
fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = channel::unbounded();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        })
        .context("Failed to spawn stdin reader")?;
    Ok(rx)
}

/// Print entries published since `seen` to stdout and advance it
fn print_changes(app: &AppContext, seen: &mut u64) -> Result<()> {
    write_changes(&mut std::io::stdout().lock(), app, seen).context("Failed to write to stdout")
}

fn write_changes<W: Write>(out: &mut W, app: &AppContext, seen: &mut u64) -> std::io::Result<()> {
    let changes = app.board.changes_since(*seen);
    if changes.is_empty() {
        return Ok(());
    }
    for (id, entry) in changes {
        writeln!(
            out,
            "== {} @ {} ==\n{}",
            id,
            entry.updated.format("%H:%M:%S"),
            entry.text
        )?;
        *seen = (*seen).max(entry.revision);
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn app() -> AppContext {
        AppContext::new(Arc::new(InMemoryMessageLog::new()))
    }

    #[test]
    fn test_write_changes_advances_seen() {
        let app = app();
        app.board.publish("clock", "12:00".to_string());
        app.board.publish("tail", "hi".to_string());

        let mut out = Vec::new();
        let mut seen = 0;
        write_changes(&mut out, &app, &mut seen).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("== clock @ "), "{}", text);
        assert!(text.contains("\nhi\n"), "{}", text);
        assert_eq!(seen, 2);

        let mut again = Vec::new();
        write_changes(&mut again, &app, &mut seen).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_write_error_is_returned() {
        let app = app();
        app.board.publish("clock", "12:00".to_string());

        let mut seen = 0;
        let err = write_changes(&mut ClosedPipe, &app, &mut seen).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(seen, 0);
    }
}
