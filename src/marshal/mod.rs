//! Metadata value marshalling between typed stores and host values.
//!
//! This module provides the two directions of the bridge:
//!
//! - [`visit_entries`] / [`collect_entries`] / [`marshal_entry`] — Walk a
//!   store and convert each typed entry into a [`MetaValue`](crate::MetaValue)
//! - [`add_value`] / [`delete_key`] / [`clear_entries`] — Write host values
//!   back into a store through its schema
//!
//! Reads expose rich types (integers, rationals, dates, lists, language
//! maps); writes accept the host's textual form and re-parse it into the
//! type the key's schema requires. The asymmetry is deliberate and matches
//! the underlying library's value model.

mod reader;
mod writer;

pub use reader::{collect_entries, marshal_entry, visit_entries};
pub use writer::{add_value, clear_entries, delete_key};
