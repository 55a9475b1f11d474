//! Error Map
//!
//! Field-path-keyed validation failures for one validation pass.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::path::FieldPath;
use crate::rule::FieldError;

/// Mapping from field path to its first failing validation.
///
/// Absence of a key means the field is currently valid. Ordered by path
/// so rendered output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<FieldPath, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.entries.insert(path, error);
    }

    pub fn remove(&mut self, path: FieldPath) -> Option<FieldError> {
        self.entries.remove(&path)
    }

    pub fn get(&self, path: FieldPath) -> Option<&FieldError> {
        self.entries.get(&path)
    }

    /// Message for the field, if it failed validation
    pub fn message(&self, path: FieldPath) -> Option<&str> {
        self.entries.get(&path).map(|error| error.message.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &FieldError)> {
        self.entries.iter().map(|(path, error)| (*path, error))
    }

    /// Re-key extra-phone errors after the entry at `removed` was deleted.
    ///
    /// The removed row's error is dropped and errors on higher rows shift
    /// down one position, so no error displays on the wrong row.
    pub fn shift_extra_phones(&mut self, removed: usize) {
        let entries = std::mem::take(&mut self.entries);
        for (path, error) in entries {
            let key = match path {
                FieldPath::ExtraPhone(index) if index == removed => continue,
                FieldPath::ExtraPhone(index) if index > removed => {
                    FieldPath::ExtraPhone(index - 1)
                }
                other => other,
            };
            self.entries.insert(key, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::FieldErrorKind;

    fn error(message: &str) -> FieldError {
        FieldError::new(FieldErrorKind::MissingRequired, message)
    }

    #[test]
    fn test_insert_get_message() {
        let mut map = ErrorMap::new();
        assert!(map.is_empty());
        map.insert(FieldPath::Username, error("Username is required"));
        assert_eq!(map.message(FieldPath::Username), Some("Username is required"));
        assert_eq!(map.message(FieldPath::Email), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_shift_drops_removed_row_and_rekeys_higher() {
        let mut map = ErrorMap::new();
        map.insert(FieldPath::Username, error("keep"));
        map.insert(FieldPath::ExtraPhone(1), error("row one"));
        map.insert(FieldPath::ExtraPhone(2), error("row two"));

        map.shift_extra_phones(1);

        assert_eq!(map.message(FieldPath::Username), Some("keep"));
        assert_eq!(map.message(FieldPath::ExtraPhone(1)), Some("row two"));
        assert_eq!(map.get(FieldPath::ExtraPhone(2)), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_shift_leaves_lower_rows_alone() {
        let mut map = ErrorMap::new();
        map.insert(FieldPath::ExtraPhone(0), error("first"));
        map.shift_extra_phones(2);
        assert_eq!(map.message(FieldPath::ExtraPhone(0)), Some("first"));
    }

    #[test]
    fn test_serializes_keyed_by_dotted_path() {
        let mut map = ErrorMap::new();
        map.insert(FieldPath::ExtraPhone(0), error("1 phone number is required"));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["phnNumbers.0.number"]["kind"], "required");
        assert_eq!(
            json["phnNumbers.0.number"]["message"],
            "1 phone number is required"
        );
    }
}
