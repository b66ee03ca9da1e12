//! Pure policy store model (no IO).
//!
//! Input: store operations from the app layer.
//! Output: mutated policies and libraries, or a typed error with the store left untouched.

#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod policy;
pub mod scan;
pub mod store;

mod document;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use error::{DocumentError, EntityKind, PolicyError};
pub use library::PolicyLibrary;
pub use policy::{Attribution, NewPolicy, Policy, PolicyEdit};
pub use scan::{PolicyScan, Recommendation};
pub use store::PolicyStore;
