// src/ui/render.rs
use std::fmt::Write;

use super::viewport::Viewport;
use crate::services::{
    session::ChatSession,
    transcript::{Message, Sender},
};

pub const TITLE: &str = "MANIT Bhopal AI Assistant";
pub const SUBTITLE: &str = "Ask me anything about MANIT Bhopal";
pub const WELCOME: &str = "Welcome to MANIT Bhopal AI Assistant. How can I help you today?";
pub const TYPING: &str = "Bot: ...";
pub const PROMPT_IDLE: &str = "Type your question here...";
pub const PROMPT_PENDING: &str = "Sending...";

pub fn header(width: usize) -> String {
    let rule = "=".repeat(width);
    format!("{rule}\n{TITLE}\n{SUBTITLE}\n{rule}\n")
}

pub fn prompt(session: &ChatSession) -> &'static str {
    if session.is_pending() {
        PROMPT_PENDING
    } else {
        PROMPT_IDLE
    }
}

fn message_line(msg: &Message, width: usize) -> String {
    match msg.sender() {
        Sender::User => format!("{:>width$}", format!("You: {}", msg.text())),
        Sender::Bot => format!("Bot: {}", msg.text()),
    }
}

/// Draw the visible part of the transcript, plus the typing indicator
/// while a request is pending. The viewport must be synced first.
pub fn transcript(session: &ChatSession, viewport: &Viewport, width: usize) -> String {
    let mut out = String::new();
    let messages = session.transcript().as_slice();

    if messages.is_empty() {
        let _ = writeln!(out, "{WELCOME}");
    } else {
        let range = viewport.visible();
        let end = range.end.min(messages.len());
        let start = range.start.min(end);
        if start > 0 {
            let _ = writeln!(out, "({start} earlier)");
        }
        for msg in &messages[start..end] {
            let _ = writeln!(out, "{}", message_line(msg, width));
        }
        if end < messages.len() {
            let _ = writeln!(out, "({} newer, /down to follow)", messages.len() - end);
        }
    }

    if session.is_pending() {
        let _ = writeln!(out, "{TYPING}");
    }
    out
}

/// Whole screen: header, transcript and prompt.
pub fn screen(session: &ChatSession, viewport: &Viewport, width: usize) -> String {
    format!(
        "{}{}> {}",
        header(width),
        transcript(session, viewport, width),
        prompt(session)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::AnswerResponse;

    fn ask(session: &mut ChatSession, text: &str, answer: &str) {
        session.set_draft(text);
        let pending = session.begin_submit().unwrap();
        session.resolve(pending, Ok(AnswerResponse::new(answer)));
    }

    fn draw(session: &ChatSession, viewport: &mut Viewport) -> String {
        viewport.sync(session.transcript().len());
        transcript(session, viewport, 40)
    }

    #[test]
    fn welcome_only_while_transcript_is_empty() {
        let mut session = ChatSession::new();
        let mut viewport = Viewport::new(10);
        assert!(draw(&session, &mut viewport).contains(WELCOME));
        assert_eq!(prompt(&session), PROMPT_IDLE);

        session.set_draft("Where is MANIT located?");
        let pending = session.begin_submit().unwrap();
        let out = draw(&session, &mut viewport);
        assert!(!out.contains(WELCOME));
        assert!(out.contains("You: Where is MANIT located?"));

        session.resolve(pending, Ok(AnswerResponse::new("Bhopal, India")));
        assert!(!draw(&session, &mut viewport).contains(WELCOME));
    }

    #[test]
    fn typing_indicator_only_while_pending() {
        let mut session = ChatSession::new();
        let mut viewport = Viewport::new(10);
        session.set_draft("Hello");
        let pending = session.begin_submit().unwrap();

        let out = draw(&session, &mut viewport);
        assert!(out.trim_end().ends_with(TYPING));
        assert_eq!(prompt(&session), PROMPT_PENDING);
        assert!(screen(&session, &viewport, 40).ends_with(PROMPT_PENDING));

        session.resolve(pending, Ok(AnswerResponse::new("Hi")));
        let out = draw(&session, &mut viewport);
        assert!(!out.contains(TYPING));
        assert!(out.contains("Bot: Hi"));
        assert_eq!(prompt(&session), PROMPT_IDLE);
    }

    #[test]
    fn window_marks_hidden_messages() {
        let mut session = ChatSession::new();
        let mut viewport = Viewport::new(2);
        ask(&mut session, "one", "1");
        ask(&mut session, "two", "2");

        let out = draw(&session, &mut viewport);
        assert!(out.starts_with("(2 earlier)\n"));
        assert!(out.contains("You: two"));
        assert!(out.contains("Bot: 2"));
        assert!(!out.contains("You: one"));
        assert!(!out.contains("newer"));

        viewport.scroll_up(1);
        let out = transcript(&session, &viewport, 40);
        assert!(out.starts_with("(1 earlier)\n"));
        assert!(out.contains("Bot: 1"));
        assert!(out.contains("(1 newer, /down to follow)"));
    }

    #[test]
    fn user_lines_are_right_aligned() {
        let line = message_line(&Message::user("hi"), 12);
        assert_eq!(line, "     You: hi");
        assert_eq!(message_line(&Message::bot("yo"), 12), "Bot: yo");
    }
}
