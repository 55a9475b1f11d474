//! Form Controller
//!
//! Owns the record, rules, error map, and submission state for one form
//! session. All operations run synchronously inside a single event turn.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::errors::ErrorMap;
use crate::observe::{FormEvent, FormObserver};
use crate::path::{FieldPath, PathError, PhoneSlot, SocialField};
use crate::record::ProfileRecord;
use crate::rule::{ValidationRule, EMAIL_PATTERN};
use crate::state::FormState;

/// Variable-length lists addressable on the profile record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPath {
    /// `phnNumbers`
    ExtraPhones,
}

/// Error attaching a rule to a field path
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegisterError {
    /// Extra-phone rules can only target entries that already exist
    #[error("no list entry at index {0}; append it first")]
    EntryNotPresent(usize),
}

fn not_admin(value: &str) -> Option<String> {
    (value == "admin@example.com").then(|| "Enter a different email address".to_string())
}

fn no_blacklisted_domain(value: &str) -> Option<String> {
    value
        .ends_with("baddomain.com")
        .then(|| "This domain is not supported".to_string())
}

/// Controller for one profile form session.
///
/// Exclusively owns the record and error map from construction to drop;
/// the UI layer routes raw input strings in by path and renders the error
/// map back out.
pub struct ProfileForm {
    record: ProfileRecord,
    rules: BTreeMap<FieldPath, ValidationRule>,
    errors: ErrorMap,
    state: FormState,
    observers: Vec<Box<dyn FormObserver>>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileForm {
    /// Create a controller with the standard profile rule set attached
    pub fn new() -> Self {
        let mut form = Self::bare();
        form.install_standard_rules();
        form
    }

    /// Create a controller with no rules attached
    pub fn bare() -> Self {
        Self {
            record: ProfileRecord::default(),
            rules: BTreeMap::new(),
            errors: ErrorMap::new(),
            state: FormState::Pristine,
            observers: Vec::new(),
        }
    }

    fn install_standard_rules(&mut self) {
        self.rules.insert(
            FieldPath::Username,
            ValidationRule::new().required("Username is required"),
        );
        self.rules.insert(
            FieldPath::Email,
            ValidationRule::new()
                .pattern(EMAIL_PATTERN.clone(), "Invalid email format")
                .check("not-admin", not_admin)
                .check("no-blacklisted-domain", no_blacklisted_domain),
        );
        self.rules.insert(
            FieldPath::Channel,
            ValidationRule::new().required("Channel is required"),
        );
        self.rules.insert(
            FieldPath::Social(SocialField::Twitter),
            ValidationRule::new().required("Twitter is required"),
        );
        self.rules.insert(
            FieldPath::Social(SocialField::Facebook),
            ValidationRule::new().required("Facebook is required"),
        );
        self.rules.insert(
            FieldPath::Phone(PhoneSlot::Primary),
            ValidationRule::new().required("Primary phone number is required"),
        );
        self.rules.insert(
            FieldPath::Phone(PhoneSlot::Secondary),
            ValidationRule::new().required("Secondary phone number is required"),
        );
        // only the first entry of the variable-length list is required
        self.rules.insert(
            FieldPath::ExtraPhone(0),
            ValidationRule::new().required("1 phone number is required"),
        );
    }

    /// Attach (or replace) the validation rule for a leaf path.
    ///
    /// Extra-phone paths must address an entry that already exists; list
    /// growth happens only through [`ProfileForm::append_entry`].
    pub fn register(&mut self, path: FieldPath, rule: ValidationRule) -> Result<(), RegisterError> {
        if let FieldPath::ExtraPhone(index) = path {
            if index >= self.record.extra_phones.len() {
                return Err(RegisterError::EntryNotPresent(index));
            }
        }
        tracing::trace!(field = %path, "rule registered");
        self.rules.insert(path, rule);
        Ok(())
    }

    /// Current value of the field at `path`
    pub fn value(&self, path: FieldPath) -> Option<&str> {
        self.record.get(path)
    }

    /// Route a raw input value to the field at `path`.
    ///
    /// Once a submit has been attempted, the field is re-validated on
    /// every change and its error-map entry updated in place; before the
    /// first attempt errors stay hidden.
    pub fn set_value(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), PathError> {
        let value = value.into();
        self.record.set(path, value.clone())?;
        tracing::trace!(field = %path, "value changed");
        if self.state.has_submitted() {
            self.revalidate_field(path);
        }
        self.notify(FormEvent::FieldChanged { path, value });
        Ok(())
    }

    /// Append a fresh entry to the named variable-length list, returning
    /// its index. New entries are never required.
    pub fn append_entry(&mut self, list: ListPath) -> usize {
        let ListPath::ExtraPhones = list;
        let index = self.record.extra_phones.append();
        self.rules.insert(FieldPath::ExtraPhone(index), ValidationRule::new());
        tracing::debug!(index, "list entry appended");
        self.notify(FormEvent::EntryAppended { index });
        index
    }

    /// Remove the list entry at `index`.
    ///
    /// Protected indices are a no-op returning `false`. Rules and errors
    /// for higher indices shift down one position so they keep addressing
    /// the same entries; the moved rows re-validate if the form has been
    /// submitted.
    pub fn remove_entry(&mut self, list: ListPath, index: usize) -> bool {
        let ListPath::ExtraPhones = list;
        if !self.record.extra_phones.remove(index) {
            tracing::debug!(index, "list entry removal refused");
            return false;
        }
        self.shift_extra_phone_rules(index);
        self.errors.shift_extra_phones(index);
        if self.state.has_submitted() {
            for moved in index..self.record.extra_phones.len() {
                self.revalidate_field(FieldPath::ExtraPhone(moved));
            }
        }
        tracing::debug!(index, "list entry removed");
        self.notify(FormEvent::EntryRemoved { index });
        true
    }

    fn shift_extra_phone_rules(&mut self, removed: usize) {
        let rules = std::mem::take(&mut self.rules);
        for (path, rule) in rules {
            let key = match path {
                FieldPath::ExtraPhone(index) if index == removed => continue,
                FieldPath::ExtraPhone(index) if index > removed => {
                    FieldPath::ExtraPhone(index - 1)
                }
                other => other,
            };
            self.rules.insert(key, rule);
        }
    }

    fn revalidate_field(&mut self, path: FieldPath) {
        let Some(rule) = self.rules.get(&path) else {
            return;
        };
        let value = self.record.get(path).unwrap_or("");
        match rule.evaluate(value) {
            Some(error) => self.errors.insert(path, error),
            None => {
                self.errors.remove(path);
            }
        }
    }

    /// Run every registered rule against the current record.
    ///
    /// Per field: required first, then pattern, then named checks in
    /// declaration order; the first failure wins. Pure: the controller's
    /// own error map is untouched.
    pub fn validate_all(&self) -> ErrorMap {
        let mut map = ErrorMap::new();
        for (path, rule) in &self.rules {
            let value = self.record.get(*path).unwrap_or("");
            if let Some(error) = rule.evaluate(value) {
                map.insert(*path, error);
            }
        }
        tracing::debug!(errors = map.len(), "validation pass complete");
        map
    }

    /// Validate everything and either yield a frozen snapshot of the
    /// record or the error map for display.
    ///
    /// On success the snapshot is also reported to the diagnostic sink.
    pub fn submit(&mut self) -> Result<ProfileRecord, ErrorMap> {
        self.state = FormState::Validating;
        let map = self.validate_all();
        self.notify(FormEvent::Validated {
            error_count: map.len(),
        });
        self.errors = map.clone();
        if map.is_empty() {
            self.state = FormState::Valid;
            let snapshot = self.record.clone();
            match serde_json::to_string(&snapshot) {
                Ok(json) => tracing::info!(record = %json, "form submitted"),
                Err(err) => tracing::warn!(%err, "submitted record did not serialize"),
            }
            self.notify(FormEvent::Submitted {
                ok: true,
                error_count: 0,
            });
            Ok(snapshot)
        } else {
            self.state = FormState::Invalid;
            self.notify(FormEvent::Submitted {
                ok: false,
                error_count: map.len(),
            });
            Err(map)
        }
    }

    /// Return the record to its defaults and the session to pristine
    pub fn reset(&mut self) {
        self.record = ProfileRecord::default();
        self.errors.clear();
        self.state = FormState::Pristine;
        let len = self.record.extra_phones.len();
        self.rules
            .retain(|path, _| !matches!(path, FieldPath::ExtraPhone(index) if *index >= len));
        tracing::debug!("form reset");
        self.notify(FormEvent::Reset);
    }

    /// Attach a passive observer (devtools hook)
    pub fn attach_observer(&mut self, observer: Box<dyn FormObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, event: FormEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    /// Errors from the most recent validation activity
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state == FormState::Valid
    }

    /// Registered field paths in display order
    pub fn registered_paths(&self) -> impl Iterator<Item = FieldPath> + '_ {
        self.rules.keys().copied()
    }

    /// The rule registered for `path`, if any
    pub fn rule(&self, path: FieldPath) -> Option<&ValidationRule> {
        self.rules.get(&path)
    }
}
