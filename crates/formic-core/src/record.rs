//! Profile Record
//!
//! The aggregate of all field values owned by one form session.

use serde::Serialize;

use crate::list::FieldArray;
use crate::path::{FieldPath, PathError, SocialField};

/// Social handles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Social {
    pub twitter: String,
    pub facebook: String,
}

/// One entry in the variable-length phone number list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhoneEntry {
    pub number: String,
}

/// All field values for one profile form session.
///
/// Serialized field names match the wire shape the record is reported
/// with on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub username: String,
    pub email: String,
    pub channel: String,
    pub social: Social,
    #[serde(rename = "phoneNumbers")]
    pub phone_numbers: [String; 2],
    #[serde(rename = "phnNumbers")]
    pub extra_phones: FieldArray<PhoneEntry>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            username: "Batman".to_string(),
            email: String::new(),
            channel: String::new(),
            social: Social::default(),
            phone_numbers: [String::new(), String::new()],
            extra_phones: FieldArray::default(),
        }
    }
}

impl ProfileRecord {
    /// Read the leaf value addressed by `path`
    pub fn get(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::Username => Some(self.username.as_str()),
            FieldPath::Email => Some(self.email.as_str()),
            FieldPath::Channel => Some(self.channel.as_str()),
            FieldPath::Social(SocialField::Twitter) => Some(self.social.twitter.as_str()),
            FieldPath::Social(SocialField::Facebook) => Some(self.social.facebook.as_str()),
            FieldPath::Phone(slot) => Some(self.phone_numbers[slot.index()].as_str()),
            FieldPath::ExtraPhone(index) => {
                self.extra_phones.get(index).map(|entry| entry.number.as_str())
            }
        }
    }

    /// Write the leaf value addressed by `path`
    pub fn set(&mut self, path: FieldPath, value: String) -> Result<(), PathError> {
        match path {
            FieldPath::Username => self.username = value,
            FieldPath::Email => self.email = value,
            FieldPath::Channel => self.channel = value,
            FieldPath::Social(SocialField::Twitter) => self.social.twitter = value,
            FieldPath::Social(SocialField::Facebook) => self.social.facebook = value,
            FieldPath::Phone(slot) => self.phone_numbers[slot.index()] = value,
            FieldPath::ExtraPhone(index) => {
                let entry = self
                    .extra_phones
                    .get_mut(index)
                    .ok_or(PathError::NoSuchEntry(index))?;
                entry.number = value;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PhoneSlot;

    #[test]
    fn test_defaults() {
        let record = ProfileRecord::default();
        assert_eq!(record.username, "Batman");
        assert_eq!(record.email, "");
        assert_eq!(record.phone_numbers, [String::new(), String::new()]);
        assert_eq!(record.extra_phones.len(), 1);
        assert_eq!(record.extra_phones.get(0).unwrap().number, "");
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut record = ProfileRecord::default();
        let paths = [
            FieldPath::Username,
            FieldPath::Email,
            FieldPath::Channel,
            FieldPath::Social(SocialField::Twitter),
            FieldPath::Social(SocialField::Facebook),
            FieldPath::Phone(PhoneSlot::Primary),
            FieldPath::Phone(PhoneSlot::Secondary),
            FieldPath::ExtraPhone(0),
        ];
        for (i, path) in paths.into_iter().enumerate() {
            let value = format!("value-{}", i);
            record.set(path, value.clone()).unwrap();
            assert_eq!(record.get(path), Some(value.as_str()));
        }
    }

    #[test]
    fn test_missing_entry_rejected() {
        let mut record = ProfileRecord::default();
        assert_eq!(record.get(FieldPath::ExtraPhone(3)), None);
        assert_eq!(
            record.set(FieldPath::ExtraPhone(3), "x".to_string()),
            Err(PathError::NoSuchEntry(3))
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ProfileRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("phoneNumbers").is_some());
        assert!(json.get("phnNumbers").is_some());
        assert_eq!(json["phnNumbers"][0]["number"], "");
    }
}
