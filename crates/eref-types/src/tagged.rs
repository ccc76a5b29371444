//! The [`Tagged`] trait shared by refs, ref lists, and hierarchy nodes.

use std::borrow::Borrow;

/// A value that carries a discriminant tag.
///
/// Hierarchies look nodes up by tag, and lists enforce a single tag across
/// their members. Domain code that mixes several ref kinds in one hierarchy
/// implements this for its own sum type:
///
/// ```
/// use eref_types::{EntityRef, Tagged};
///
/// enum Node {
///     Org(EntityRef<&'static str, u64>),
///     Team(EntityRef<&'static str, String>),
/// }
///
/// impl Tagged for Node {
///     type Tag = &'static str;
///
///     fn tag(&self) -> &Self::Tag {
///         match self {
///             Node::Org(r) => r.tag(),
///             Node::Team(r) => r.tag(),
///         }
///     }
/// }
///
/// let node = Node::Team(EntityRef::create("team", "core".to_string()));
/// assert!(node.has_tag("team"));
/// ```
pub trait Tagged {
    /// The discriminant type.
    type Tag;

    /// The tag of this value.
    fn tag(&self) -> &Self::Tag;

    /// Returns `true` if this value's tag equals `tag`.
    fn has_tag<Q>(&self, tag: &Q) -> bool
    where
        Self::Tag: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.tag().borrow() == tag
    }
}

impl<N: Tagged + ?Sized> Tagged for Box<N> {
    type Tag = N::Tag;

    fn tag(&self) -> &Self::Tag {
        (**self).tag()
    }
}
