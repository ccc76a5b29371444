//! Foundation types for eref.
//!
//! This crate provides the tagged, immutable value reference that every other
//! eref crate builds on, together with the payload and tagging abstractions
//! used to compare and group references.
//!
//! # Key Types
//!
//! - [`EntityRef`]: Tagged immutable reference, a discriminant tag plus payload
//! - [`Value`]: Dynamic payload with one-level shallow equality
//! - [`AnyRef`]: Fully dynamic ref (`String` tag, [`Value`] payload)
//! - [`Tagged`]: Anything that exposes a tag (refs, lists, hierarchy nodes)
//!
//! # Equality
//!
//! Two refs are equal when their tags are equal and their payloads are equal.
//! Tags partition the equality space: refs of different tags are never equal,
//! whatever their payloads. Statically typed payloads use their own
//! `PartialEq`; [`Value`] payloads compare one level deep only.

pub mod entity;
pub mod tagged;
pub mod value;

pub use entity::EntityRef;
pub use tagged::Tagged;
pub use value::{AnyRef, Value};
