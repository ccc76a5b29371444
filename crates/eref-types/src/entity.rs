use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tagged::Tagged;

/// Tagged, immutable reference to a domain entity.
///
/// An `EntityRef` pairs a discriminant `tag` (usually a short string or an
/// enum constant) with a payload. Neither can change after construction; the
/// payload lives behind an `Arc`, so clones are cheap and share the same
/// allocation.
///
/// Equality depends only on `(tag, data)`. See [`EntityRef::is_equal`].
#[derive(Debug, Serialize, Deserialize)]
pub struct EntityRef<T, D> {
    tag: T,
    data: Arc<D>,
}

impl<T, D> EntityRef<T, D> {
    /// Wrap `data` under `tag`. Always succeeds.
    pub fn create(tag: T, data: D) -> Self {
        Self {
            tag,
            data: Arc::new(data),
        }
    }

    /// The discriminant tag.
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// The payload.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Returns `true` if both refs share one payload allocation.
    pub fn shares_payload(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: PartialEq, D: PartialEq> EntityRef<T, D> {
    /// Decide whether two refs denote the same entity.
    ///
    /// 1. The same ref (or a clone sharing its payload) is equal to itself.
    /// 2. Refs with different tags are never equal.
    /// 3. Otherwise the payloads decide, using the payload's own equality.
    ///    For [`Value`](crate::Value) payloads that is a one-level shallow
    ///    comparison.
    pub fn is_equal(a: &Self, b: &Self) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        if a.tag != b.tag {
            return false;
        }
        a.shares_payload(b) || a.data == b.data
    }
}

impl<T: 'static, D: 'static> EntityRef<T, D> {
    /// Returns `true` if `value` is an `EntityRef<T, D>` of any tag.
    pub fn is(value: &dyn Any) -> bool {
        value.is::<Self>()
    }

    /// Returns `true` if `value` is an `EntityRef<T, D>` tagged with `tag`.
    pub fn is_of_type<Q>(tag: &Q, value: &dyn Any) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        Self::narrow(tag, value).is_some()
    }

    /// Narrow an arbitrary value to a ref of this type carrying `tag`.
    pub fn narrow<'a, Q>(tag: &Q, value: &'a dyn Any) -> Option<&'a Self>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        value.downcast_ref::<Self>().filter(|r| r.has_tag(tag))
    }
}

impl<T: Clone, D> Clone for EntityRef<T, D> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            data: Arc::clone(&self.data),
        }
    }
}

impl<T, D> Tagged for EntityRef<T, D> {
    type Tag = T;

    fn tag(&self) -> &T {
        &self.tag
    }
}

impl<T: PartialEq, D: PartialEq> PartialEq for EntityRef<T, D> {
    fn eq(&self, other: &Self) -> bool {
        Self::is_equal(self, other)
    }
}

impl<T: Eq, D: Eq> Eq for EntityRef<T, D> {}

impl<T: Hash, D: Hash> Hash for EntityRef<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        self.data.hash(state);
    }
}

impl<T: fmt::Display, D: fmt::Display> fmt::Display for EntityRef<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tag, self.data)
    }
}
