//! Formic Core - Form State Engine
//!
//! Headless form state for a user-profile form: the record of field
//! values, per-field validation rules, a path-keyed error map, a
//! variable-length field array, and the controller that gates submission.

mod controller;
mod errors;
mod list;
mod observe;
mod path;
mod record;
mod rule;
mod state;

pub use controller::{ListPath, ProfileForm, RegisterError};
pub use errors::ErrorMap;
pub use list::{FieldArray, ListPolicy};
pub use observe::{FormEvent, FormObserver};
pub use path::{FieldPath, PathError, PhoneSlot, SocialField};
pub use record::{PhoneEntry, ProfileRecord, Social};
pub use rule::{CustomCheck, FieldError, FieldErrorKind, ValidationRule};
pub use state::FormState;
