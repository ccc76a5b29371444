//! Ordered ref hierarchies for eref.
//!
//! A [`RefHierarchy`] records where an operation is scoped: e.g. workspace W,
//! optionally project P, optionally collection C. Slots run from the
//! outermost scope to the innermost and any of them may be absent. Lookups
//! skip absent slots:
//!
//! - [`RefHierarchy::root`]: first occupied slot
//! - [`RefHierarchy::leaf`]: last occupied slot
//! - [`RefHierarchy::get_ref`]: first occupied slot with a given tag
//!
//! Nodes are anything implementing [`Tagged`](eref_types::Tagged): plain
//! refs, [`RefNode`] (a ref or a ref list), or a domain-specific enum.
//!
//! # Quick Start
//!
//! ```rust
//! use eref_hierarchy::RefHierarchy;
//! use eref_types::EntityRef;
//!
//! let project = EntityRef::create("project", 2u64);
//! let collection = EntityRef::create("collection", 3u64);
//!
//! let scope = RefHierarchy::new([None, Some(project.clone()), Some(collection.clone())]).unwrap();
//! assert_eq!(scope.root(), &project);
//! assert_eq!(scope.leaf(), &collection);
//! assert!(scope.get_ref("workspace").is_none());
//! ```

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod node;

pub use config::{DuplicateTagPolicy, HierarchyConfig};
pub use error::{HierarchyError, HierarchyResult};
pub use hierarchy::{Iter, RefHierarchy};
pub use node::RefNode;
