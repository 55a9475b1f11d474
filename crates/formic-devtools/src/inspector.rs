//! Form Inspector
//!
//! Ring-buffered log of form events plus state snapshots.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use formic_core::{FormEvent, FormObserver, ProfileForm};
use serde_json::json;

/// One recorded form event
#[derive(Debug, Clone)]
pub struct InspectorEntry {
    /// Monotonic sequence number within this inspector
    pub seq: u64,
    pub event: FormEvent,
}

impl fmt::Display for InspectorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            FormEvent::FieldChanged { path, value } => {
                write!(f, "#{} {} = {:?}", self.seq, path, value)
            }
            FormEvent::EntryAppended { index } => {
                write!(f, "#{} entry {} appended", self.seq, index)
            }
            FormEvent::EntryRemoved { index } => {
                write!(f, "#{} entry {} removed", self.seq, index)
            }
            FormEvent::Validated { error_count } => {
                write!(f, "#{} validated, {} error(s)", self.seq, error_count)
            }
            FormEvent::Submitted { ok: true, .. } => write!(f, "#{} submitted", self.seq),
            FormEvent::Submitted { ok: false, error_count } => {
                write!(f, "#{} submit blocked, {} error(s)", self.seq, error_count)
            }
            FormEvent::Reset => write!(f, "#{} reset", self.seq),
        }
    }
}

/// Passive recorder of form activity.
///
/// Keeps a bounded ring buffer of events and per-event counters. Attach
/// via a shared handle so the buffer stays readable after the controller
/// takes the observer box.
#[derive(Debug)]
pub struct FormInspector {
    entries: VecDeque<InspectorEntry>,
    max_entries: usize,
    counters: HashMap<&'static str, u32>,
    next_seq: u64,
}

impl Default for FormInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormInspector {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
            counters: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Shared handle suitable for [`ProfileForm::attach_observer`]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn entries(&self) -> impl Iterator<Item = &InspectorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many events with this label were observed (counts survive
    /// ring-buffer eviction)
    pub fn count(&self, label: &str) -> u32 {
        self.counters.get(label).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters.clear();
    }

    /// Serialized view of a controller's current state
    pub fn snapshot(form: &ProfileForm) -> serde_json::Value {
        json!({
            "record": form.record(),
            "errors": form.errors(),
            "state": form.state(),
        })
    }

    fn label(event: &FormEvent) -> &'static str {
        match event {
            FormEvent::FieldChanged { .. } => "field_changed",
            FormEvent::EntryAppended { .. } => "entry_appended",
            FormEvent::EntryRemoved { .. } => "entry_removed",
            FormEvent::Validated { .. } => "validated",
            FormEvent::Submitted { .. } => "submitted",
            FormEvent::Reset => "reset",
        }
    }
}

impl FormObserver for FormInspector {
    fn on_event(&mut self, event: &FormEvent) {
        let entry = InspectorEntry {
            seq: self.next_seq,
            event: event.clone(),
        };
        self.next_seq += 1;
        *self.counters.entry(Self::label(event)).or_insert(0) += 1;
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}
