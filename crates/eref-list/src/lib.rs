//! Deduplicated same-tag ref collections.
//!
//! A [`RefList`] groups sibling refs of one tag, e.g. every collection a
//! request touches inside one project. Lists are never empty, never mix tags,
//! and never hold two equal refs; a duplicate in the input is dropped
//! silently and the first occurrence keeps its position.

pub mod error;
pub mod list;

pub use error::{ListError, ListResult};
pub use list::RefList;
