//! Client view model.
//!
//! The list-level and per-entry state machines from the UI are explicit
//! values here (`ListPhase`, `EntryPhase`) so illegal combinations are
//! unrepresentable: an entry cannot be "mutating" while the list is
//! still loading, because entries only exist once the list is `Ready`.
//!
//! User intent produces a [`Command`] (the request to issue); completed
//! requests come back as an [`ApiEvent`] applied to the model. Both
//! directions are pure, so the whole behavioral contract is testable
//! without a terminal or network.

use crate::domain::{Todo, normalize_title};

/// State of the list as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Initial load still in flight.
    Loading,
    /// List confirmed by the server.
    Ready,
    /// Initial load failed; list stays empty.
    Failed,
}

/// State of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    Idle,
    /// A toggle or delete for this entry is in flight; its controls are
    /// inert until the response arrives.
    Mutating,
}

/// One rendered entry: the server-confirmed todo plus its phase.
#[derive(Debug, Clone)]
pub struct Entry {
    pub todo: Todo,
    pub phase: EntryPhase,
}

impl Entry {
    fn idle(todo: Todo) -> Self {
        Self {
            todo,
            phase: EntryPhase::Idle,
        }
    }
}

/// Delete awaiting explicit confirmation, naming the todo's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub title: String,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Creation form: typing edits the draft.
    Input,
    /// List: navigation, toggle, delete.
    List,
}

/// A request the UI wants issued. The event loop spawns it and feeds
/// the outcome back as an [`ApiEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Create { title: String },
    Toggle { id: i64, is_complete: bool },
    Delete { id: i64 },
}

/// Outcome of a completed request, with failures reduced to display
/// messages.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    Loaded(Result<Vec<Todo>, String>),
    Created(Result<Todo, String>),
    Toggled { id: i64, result: Result<Todo, String> },
    Deleted { id: i64, result: Result<(), String> },
}

/// The client view model.
#[derive(Debug, Clone)]
pub struct AppModel {
    /// List state machine.
    pub phase: ListPhase,
    /// Ordered entries as last confirmed by the server.
    pub entries: Vec<Entry>,
    /// Latest failure message; `None` when the last operation succeeded.
    pub error: Option<String>,
    /// Draft title for the creation form.
    pub draft: String,
    /// Create request in flight; duplicate submissions are dropped.
    pub submitting: bool,
    /// Delete awaiting confirmation.
    pub confirm: Option<PendingDelete>,
    /// Cursor within the list.
    pub selected: usize,
    /// Current keyboard focus.
    pub focus: Focus,
    /// Set when the user asked to quit.
    pub quit: bool,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    /// Creates the initial model: loading, empty, input focused.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            entries: Vec::new(),
            error: None,
            draft: String::new(),
            submitting: false,
            confirm: None,
            selected: 0,
            focus: Focus::Input,
            quit: false,
        }
    }

    // -------------------------------------------------------------------------
    // User intent -> Command
    // -------------------------------------------------------------------------

    /// Submits the creation form.
    ///
    /// Returns `None` while a create is already in flight or when the
    /// draft is blank after trimming; the draft is only cleared once
    /// the server confirms the creation.
    pub fn submit_draft(&mut self) -> Option<Command> {
        if self.submitting {
            return None;
        }
        let title = normalize_title(&self.draft)?;
        self.submitting = true;
        Some(Command::Create { title })
    }

    /// Requests a completeness toggle for the selected entry, sending
    /// the negation of its current flag.
    ///
    /// Ignored while that entry is already mutating.
    pub fn toggle_selected(&mut self) -> Option<Command> {
        let entry = self.entries.get_mut(self.selected)?;
        if entry.phase == EntryPhase::Mutating {
            return None;
        }
        entry.phase = EntryPhase::Mutating;
        Some(Command::Toggle {
            id: entry.todo.id,
            is_complete: !entry.todo.is_complete,
        })
    }

    /// Opens the delete confirmation dialog for the selected entry.
    pub fn request_delete_selected(&mut self) {
        if let Some(entry) = self.entries.get(self.selected)
            && entry.phase == EntryPhase::Idle
        {
            self.confirm = Some(PendingDelete {
                id: entry.todo.id,
                title: entry.todo.title.clone(),
            });
        }
    }

    /// Confirms the pending delete and marks its entry mutating.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        let pending = self.confirm.take()?;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.todo.id == pending.id)?;
        entry.phase = EntryPhase::Mutating;
        Some(Command::Delete { id: pending.id })
    }

    /// Dismisses the delete confirmation dialog.
    pub fn cancel_delete(&mut self) {
        self.confirm = None;
    }

    /// Moves the list cursor up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the list cursor down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Switches keyboard focus between the creation form and the list.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
    }

    // -------------------------------------------------------------------------
    // ApiEvent -> state transition
    // -------------------------------------------------------------------------

    /// Applies a completed request to the model.
    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(Ok(todos)) => {
                self.entries = todos.into_iter().map(Entry::idle).collect();
                self.phase = ListPhase::Ready;
                self.error = None;
            }
            ApiEvent::Loaded(Err(message)) => {
                self.phase = ListPhase::Failed;
                self.error = Some(message);
            }
            ApiEvent::Created(Ok(todo)) => {
                // The server-returned row, not a client-synthesized one.
                self.entries.insert(0, Entry::idle(todo));
                self.draft.clear();
                self.submitting = false;
                self.error = None;
            }
            ApiEvent::Created(Err(message)) => {
                // Draft stays intact for another attempt.
                self.submitting = false;
                self.error = Some(message);
            }
            ApiEvent::Toggled { id, result } => match result {
                Ok(todo) => {
                    if let Some(entry) = self.entry_mut(id) {
                        *entry = Entry::idle(todo);
                    }
                    self.error = None;
                }
                Err(message) => {
                    if let Some(entry) = self.entry_mut(id) {
                        entry.phase = EntryPhase::Idle;
                    }
                    self.error = Some(message);
                }
            },
            ApiEvent::Deleted { id, result } => match result {
                Ok(()) => {
                    self.entries.retain(|entry| entry.todo.id != id);
                    if self.selected >= self.entries.len() {
                        self.selected = self.entries.len().saturating_sub(1);
                    }
                    self.error = None;
                }
                Err(message) => {
                    if let Some(entry) = self.entry_mut(id) {
                        entry.phase = EntryPhase::Idle;
                    }
                    self.error = Some(message);
                }
            },
        }
    }

    fn entry_mut(&mut self, id: i64) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.todo.id == id)
    }
}
