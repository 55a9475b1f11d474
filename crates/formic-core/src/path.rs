//! Field Paths
//!
//! Dotted/indexed identifiers addressing one leaf value in the form record.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Social handle fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SocialField {
    Twitter,
    Facebook,
}

/// Slots in the fixed-length phone number pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhoneSlot {
    Primary,
    Secondary,
}

impl PhoneSlot {
    /// Positional index within the pair
    pub fn index(self) -> usize {
        match self {
            PhoneSlot::Primary => 0,
            PhoneSlot::Secondary => 1,
        }
    }
}

/// Address of one leaf value in the form record.
///
/// Paths are a fixed enumerated set plus an index parameter for the
/// variable-length list, so routing never goes through reflection.
/// `Display` renders the dotted form (`social.twitter`, `phoneNumbers.0`,
/// `phnNumbers.2.number`) and `FromStr` parses it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Username,
    Email,
    Channel,
    Social(SocialField),
    Phone(PhoneSlot),
    /// `phnNumbers.<i>.number` in the variable-length list
    ExtraPhone(usize),
}

/// Error addressing a leaf value by path
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The string does not name a known leaf field
    #[error("unknown field path `{0}`")]
    UnknownField(String),
    /// A list segment carried an index that cannot be parsed or addressed
    #[error("invalid index in field path `{0}`")]
    InvalidIndex(String),
    /// The path addresses a list entry that does not exist
    #[error("no list entry at index {0}")]
    NoSuchEntry(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Username => write!(f, "username"),
            FieldPath::Email => write!(f, "email"),
            FieldPath::Channel => write!(f, "channel"),
            FieldPath::Social(SocialField::Twitter) => write!(f, "social.twitter"),
            FieldPath::Social(SocialField::Facebook) => write!(f, "social.facebook"),
            FieldPath::Phone(slot) => write!(f, "phoneNumbers.{}", slot.index()),
            FieldPath::ExtraPhone(index) => write!(f, "phnNumbers.{}.number", index),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        match segments.as_slice() {
            ["username"] => Ok(FieldPath::Username),
            ["email"] => Ok(FieldPath::Email),
            ["channel"] => Ok(FieldPath::Channel),
            ["social", "twitter"] => Ok(FieldPath::Social(SocialField::Twitter)),
            ["social", "facebook"] => Ok(FieldPath::Social(SocialField::Facebook)),
            ["phoneNumbers", index] => match *index {
                "0" => Ok(FieldPath::Phone(PhoneSlot::Primary)),
                "1" => Ok(FieldPath::Phone(PhoneSlot::Secondary)),
                _ => Err(PathError::InvalidIndex(s.to_string())),
            },
            ["phnNumbers", index, "number"] => index
                .parse::<usize>()
                .map(FieldPath::ExtraPhone)
                .map_err(|_| PathError::InvalidIndex(s.to_string())),
            _ => Err(PathError::UnknownField(s.to_string())),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
