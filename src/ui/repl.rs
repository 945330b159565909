// src/ui/repl.rs
use std::sync::Arc;

use tokio::{
    io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{debug, info};

use super::{render, viewport::Viewport};
use crate::{
    error::AskError,
    message::AnswerResponse,
    services::{
        answer_client::AnswerService,
        session::{ChatSession, PendingQuery, SubmitOutcome},
    },
};

const HELP: &str = "Commands: /up [n], /down [n], /help, /quit. Start with // to ask a question that begins with /. Anything else is sent as a question.\n";
const BUSY: &str = "(still waiting for the previous answer)\n";

#[derive(Clone, Debug)]
pub struct ReplOptions {
    pub width: usize,
    pub history: usize,
    pub show_references: bool,
    /// Clear the terminal before each redraw.
    pub clear: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self { width: 80, history: 20, show_references: false, clear: false }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Ask(&'a str),
    Up(usize),
    Down(usize),
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim_start();
        // "//" escapes a question that starts with a slash
        if trimmed.starts_with("//") {
            return Command::Ask(&trimmed[1..]);
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Ask(line);
        };
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or("");
        let count = parts.next().and_then(|n| n.parse().ok()).unwrap_or(1);
        match name {
            "quit" | "exit" => Command::Quit,
            "up" => Command::Up(count),
            "down" => Command::Down(count),
            "help" => Command::Help,
            _ => Command::Unknown(name),
        }
    }
}

type Completion = (PendingQuery, Result<AnswerResponse, AskError>);

/// Drive one chat session from `input` lines until `/quit` or EOF.
///
/// The answer request runs on its own task so input keeps flowing while it
/// is outstanding; completions come back over a channel and are applied
/// here, which keeps every session mutation on this task. On exit an
/// in-flight request is awaited, never abandoned.
pub async fn run<R, W>(
    service: Arc<dyn AnswerService>,
    opts: &ReplOptions,
    input: R,
    mut output: W,
) -> io::Result<ChatSession>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = ChatSession::new();
    let mut viewport = Viewport::new(opts.history);
    let (tx, mut rx) = mpsc::channel::<Completion>(1);
    let mut lines = input.lines();
    let mut reading = true;

    info!(session = %session.id(), "chat started");
    draw(&mut output, &session, &mut viewport, opts).await?;

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => {
                let Some(line) = line? else {
                    reading = false;
                    if !session.is_pending() {
                        break;
                    }
                    continue;
                };

                match Command::parse(&line) {
                    Command::Quit => {
                        reading = false;
                        if !session.is_pending() {
                            break;
                        }
                        continue;
                    }
                    Command::Up(n) => viewport.scroll_up(n),
                    Command::Down(n) => viewport.scroll_down(n),
                    Command::Help => {
                        output.write_all(HELP.as_bytes()).await?;
                        continue;
                    }
                    Command::Unknown(name) => {
                        output.write_all(format!("unknown command /{name}\n").as_bytes()).await?;
                        continue;
                    }
                    Command::Ask(text) => {
                        if session.is_pending() {
                            debug!(session = %session.id(), "input dropped while pending");
                            output.write_all(BUSY.as_bytes()).await?;
                            continue;
                        }
                        session.set_draft(text);
                        let Some(pending) = session.begin_submit() else {
                            continue;
                        };
                        let service = Arc::clone(&service);
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let result = service.ask(pending.query()).await;
                            let _ = tx.send((pending, result)).await;
                        });
                    }
                }
            }
            Some((pending, result)) = rx.recv() => {
                let outcome = session.resolve(pending, result);
                if opts.show_references {
                    if let SubmitOutcome::Answered { references: Some(refs) } = &outcome {
                        output.write_all(format!("{refs}\n").as_bytes()).await?;
                    }
                }
                if !reading {
                    draw(&mut output, &session, &mut viewport, opts).await?;
                    break;
                }
            }
        }

        draw(&mut output, &session, &mut viewport, opts).await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    info!(session = %session.id(), messages = session.transcript().len(), "chat ended");
    Ok(session)
}

async fn draw<W>(
    output: &mut W,
    session: &ChatSession,
    viewport: &mut Viewport,
    opts: &ReplOptions,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    viewport.sync(session.transcript().len());
    if opts.clear {
        output.write_all(b"\x1b[2J\x1b[H").await?;
    }
    let screen = render::screen(session, viewport, opts.width);
    output.write_all(screen.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
