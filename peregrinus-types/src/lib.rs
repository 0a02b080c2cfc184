//! Value objects of the Peregrinus feature model: access control lists, addresses, display colors, per-user
//! settings and locale identifiers.
//!
//! These types carry no behavior beyond validation and (de)serialization. The feature codec lives in the
//! `peregrinus` crate.

pub mod acl;
pub mod color;
pub mod contact;
pub mod error;
pub mod locale;
pub mod settings;

pub use acl::{AccessControlEntry, AccessControlList};
pub use color::{Color, DisplayColor};
pub use contact::{Address, Link, PhoneNumber};
pub use error::PeregrinusTypesError;
pub use locale::{LanguageTag, TwoLetterCountryCode};
pub use settings::{BranchSettings, FeatureSettings, RteSettings, TrkSettings, WptSettings};
