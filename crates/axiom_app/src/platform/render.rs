//! Incremental terminal rendering of the conversation view.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use axiom_core::{AppViewModel, DocumentRowView, MessageId, MessageView, Role};

const EMPTY_HINT: &str = "Upload a document and ask a question to begin.";

/// Prints only what changed since the previous view.
pub struct Renderer<W: Write> {
    out: W,
    printed: HashMap<MessageId, usize>,
    finished: HashSet<MessageId>,
    thinking_after: Option<MessageId>,
    documents: Option<Vec<DocumentRowView>>,
    notice: Option<String>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed: HashMap::new(),
            finished: HashSet::new(),
            thinking_after: None,
            documents: None,
            notice: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if view.messages.is_empty() && !self.printed.is_empty() {
            // Conversation was reset.
            self.printed.clear();
            self.finished.clear();
            writeln!(self.out, "\n-- new conversation --")?;
        }

        let last = view.messages.len().saturating_sub(1);
        for (index, message) in view.messages.iter().enumerate() {
            let still_revealing = view.thinking && index == last && message.role == Role::Assistant;
            self.render_message(message, still_revealing)?;
        }

        if view.thinking {
            if let Some(last) = view.messages.last() {
                if last.role == Role::User && self.thinking_after != Some(last.id) {
                    writeln!(self.out, "Thinking...")?;
                    self.thinking_after = Some(last.id);
                }
            }
        }

        if view.notice != self.notice {
            if let Some(notice) = &view.notice {
                writeln!(self.out, "! {notice}")?;
            }
            self.notice = view.notice.clone();
        }

        if self.documents.as_ref() != Some(&view.documents) {
            self.documents = Some(view.documents.clone());
            self.print_library(view)?;
        }

        self.out.flush()
    }

    pub fn print_library(&mut self, view: &AppViewModel) -> io::Result<()> {
        writeln!(self.out, "Indexed files:")?;
        if view.documents.is_empty() {
            writeln!(self.out, "  No files indexed yet.")?;
        }
        for doc in &view.documents {
            writeln!(self.out, "  {}", doc.label)?;
        }
        if view.uploading {
            writeln!(self.out, "  Indexing...")?;
        }
        self.out.flush()
    }

    pub fn print_empty_hint(&mut self) -> io::Result<()> {
        writeln!(self.out, "{EMPTY_HINT}")?;
        self.out.flush()
    }

    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn render_message(&mut self, message: &MessageView, still_revealing: bool) -> io::Result<()> {
        if self.finished.contains(&message.id) {
            return Ok(());
        }
        let printed = match self.printed.get(&message.id) {
            Some(len) => *len,
            None => {
                let label = match message.role {
                    Role::User => "you",
                    Role::Assistant => "axiom",
                };
                write!(self.out, "{label}> ")?;
                0
            }
        };

        // Content only ever grows by prefix extension, so the tail is new text.
        if let Some(tail) = message.content.get(printed..) {
            write!(self.out, "{tail}")?;
        }
        self.printed.insert(message.id, message.content.len());

        if !still_revealing {
            writeln!(self.out)?;
            if !message.sources.is_empty() {
                writeln!(self.out, "  Sources: {}", message.sources.join(", "))?;
            }
            self.finished.insert(message.id);
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axiom_core::SessionState;

    fn message(id: MessageId, role: Role, content: &str, sources: &[&str]) -> MessageView {
        MessageView {
            id,
            role,
            content: content.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn view(messages: Vec<MessageView>, thinking: bool) -> AppViewModel {
        AppViewModel {
            session: if thinking {
                SessionState::Busy
            } else {
                SessionState::Idle
            },
            thinking,
            show_empty_hint: messages.is_empty(),
            messages,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn reveal_is_printed_incrementally() {
        let mut renderer = Renderer::new(Vec::new());
        let user = message(1, Role::User, "refund policy", &[]);

        renderer.render(&view(vec![user.clone()], true)).unwrap();
        renderer
            .render(&view(
                vec![user.clone(), message(2, Role::Assistant, "Refu", &["7"])],
                true,
            ))
            .unwrap();
        renderer
            .render(&view(
                vec![user, message(2, Role::Assistant, "Refunds.", &["7"])],
                false,
            ))
            .unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            out,
            "you> refund policy\nThinking...\nIndexed files:\n  No files indexed yet.\n\
             axiom> Refunds.\n  Sources: 7\n"
        );
    }

    #[test]
    fn library_is_reprinted_only_on_change() {
        let mut renderer = Renderer::new(Vec::new());
        let mut v = view(Vec::new(), false);
        v.documents = vec![DocumentRowView {
            id: 1,
            label: "a.pdf".to_string(),
        }];

        renderer.render(&v).unwrap();
        renderer.render(&v).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches("Indexed files:").count(), 1);
        assert!(out.contains("  a.pdf\n"));
    }

    #[test]
    fn notice_is_printed_once() {
        let mut renderer = Renderer::new(Vec::new());
        let mut v = view(Vec::new(), false);
        v.notice = Some("Failed to upload document".to_string());

        renderer.render(&v).unwrap();
        renderer.render(&v).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches("! Failed to upload document").count(), 1);
    }
}
