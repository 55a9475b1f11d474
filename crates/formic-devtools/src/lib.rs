//! Formic DevTools
//!
//! Inspection hooks for form controllers.

mod inspector;

pub use inspector::{FormInspector, InspectorEntry};
