//! High-level SDK for eref.
//!
//! Re-exports the ref primitives from every eref crate and adds a worked
//! scope model ([`scope`]) showing how a domain combines them: one factory
//! per scope kind, a list for sibling collections, and a hierarchy for the
//! workspace → project → collection path.

pub mod error;
pub mod scope;

pub use error::{SdkError, SdkResult};
pub use scope::{ProjectKey, ScopeKind, ScopeNode, ScopePath};

// Re-export key types
pub use eref_factory::{Constructor, FactoryError, RefFactory, RefFactoryBuilder};
pub use eref_hierarchy::{
    DuplicateTagPolicy, HierarchyConfig, HierarchyError, RefHierarchy, RefNode,
};
pub use eref_list::{ListError, RefList};
pub use eref_types::{AnyRef, EntityRef, Tagged, Value};

/// Glob-importable set of the commonly used types.
pub mod prelude {
    pub use eref_factory::RefFactory;
    pub use eref_hierarchy::{HierarchyConfig, RefHierarchy, RefNode};
    pub use eref_list::RefList;
    pub use eref_types::{AnyRef, EntityRef, Tagged, Value};
}
