//! Hierarchy node type: a single ref or a list of same-tag refs.

use std::fmt;

use serde::{Deserialize, Serialize};

use eref_list::RefList;
use eref_types::{EntityRef, Tagged};

/// One level of a hierarchy.
///
/// A level usually names one entity (the workspace, the project) but may name
/// several siblings of the same tag (the collections a request spans).
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(bound(
    serialize = "T: Serialize, D: Serialize",
    deserialize = "T: Deserialize<'de> + PartialEq + Clone + fmt::Display, \
                   D: Deserialize<'de> + PartialEq"
))]
pub enum RefNode<T, D> {
    /// A single ref.
    Ref(EntityRef<T, D>),
    /// Several distinct refs sharing one tag.
    List(RefList<T, D>),
}

impl<T, D> RefNode<T, D> {
    /// The member refs: one for [`RefNode::Ref`], all for [`RefNode::List`].
    pub fn refs(&self) -> &[EntityRef<T, D>] {
        match self {
            RefNode::Ref(r) => std::slice::from_ref(r),
            RefNode::List(list) => list.as_slice(),
        }
    }

    pub fn as_single(&self) -> Option<&EntityRef<T, D>> {
        match self {
            RefNode::Ref(r) => Some(r),
            RefNode::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&RefList<T, D>> {
        match self {
            RefNode::Ref(_) => None,
            RefNode::List(list) => Some(list),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RefNode::List(_))
    }
}

impl<T: PartialEq, D: PartialEq> RefNode<T, D> {
    /// Returns `true` if `r` equals the ref or is a member of the list.
    pub fn contains(&self, r: &EntityRef<T, D>) -> bool {
        match self {
            RefNode::Ref(own) => own == r,
            RefNode::List(list) => list.has(r),
        }
    }
}

impl<T, D> Tagged for RefNode<T, D> {
    type Tag = T;

    fn tag(&self) -> &T {
        match self {
            RefNode::Ref(r) => r.tag(),
            RefNode::List(list) => list.tag(),
        }
    }
}

impl<T: Clone, D> Clone for RefNode<T, D> {
    fn clone(&self) -> Self {
        match self {
            RefNode::Ref(r) => RefNode::Ref(r.clone()),
            RefNode::List(list) => RefNode::List(list.clone()),
        }
    }
}

impl<T, D> From<EntityRef<T, D>> for RefNode<T, D> {
    fn from(r: EntityRef<T, D>) -> Self {
        RefNode::Ref(r)
    }
}

impl<T, D> From<RefList<T, D>> for RefNode<T, D> {
    fn from(list: RefList<T, D>) -> Self {
        RefNode::List(list)
    }
}
