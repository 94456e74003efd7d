//! Text-input state for adding and editing todos.
//!
//! New titles are trimmed and blank input is dropped. Editing keeps a local
//! buffer that is only submitted when it differs from the current title.

use crate::types::Todo;

/// Trimmed title ready to submit, or `None` for blank input.
pub fn submit_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Send this title to the server.
    Commit(String),
    /// Discard the buffer; the displayed title stays as it was.
    Revert,
}

/// Per-item edit mode.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    id: String,
    original: String,
    text: String,
}

impl EditBuffer {
    pub fn begin(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            original: todo.title.clone(),
            text: todo.title.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Enter, or blur.
    pub fn commit(self) -> EditOutcome {
        match submit_title(&self.text) {
            Some(title) if title != self.original => EditOutcome::Commit(title),
            _ => EditOutcome::Revert,
        }
    }

    /// Escape.
    pub fn cancel(self) -> EditOutcome {
        EditOutcome::Revert
    }
}
