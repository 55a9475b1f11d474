//! Form Observers
//!
//! Capability interface for external inspection of form activity.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::path::FieldPath;

/// Something that happened inside a form controller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// A leaf value changed
    FieldChanged { path: FieldPath, value: String },
    /// An entry was appended to the variable-length list
    EntryAppended { index: usize },
    /// An entry was removed from the variable-length list
    EntryRemoved { index: usize },
    /// A full validation pass completed
    Validated { error_count: usize },
    /// A submit attempt finished
    Submitted { ok: bool, error_count: usize },
    /// The form returned to its default values
    Reset,
}

/// Observer attached to a form controller.
///
/// Observers are passive: they see events after the fact and cannot
/// influence the controller's behavior.
pub trait FormObserver {
    fn on_event(&mut self, event: &FormEvent);
}

/// Shared-handle observers, for inspectors the caller keeps a handle to
/// after attaching. The form session is single-threaded.
impl<T: FormObserver> FormObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &FormEvent) {
        self.borrow_mut().on_event(event);
    }
}
