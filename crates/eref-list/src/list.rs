use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use eref_types::{EntityRef, Tagged};

use crate::error::{ListError, ListResult};

/// Non-empty, order-preserving collection of distinct refs sharing one tag.
///
/// The tag is taken from the first ref. Membership uses
/// [`EntityRef::is_equal`], not allocation identity, so two separately
/// created refs with the same tag and payload count as one member.
#[derive(Debug)]
pub struct RefList<T, D> {
    tag: T,
    refs: Vec<EntityRef<T, D>>,
}

impl<T, D> RefList<T, D>
where
    T: PartialEq + Clone + fmt::Display,
    D: PartialEq,
{
    /// Build a list from a non-empty sequence of same-tag refs.
    ///
    /// Fails with [`ListError::Empty`] for an empty input and with
    /// [`ListError::TagMismatch`] when a ref carries a different tag than the
    /// first one. Duplicates are dropped.
    pub fn new<I>(refs: I) -> ListResult<Self>
    where
        I: IntoIterator<Item = EntityRef<T, D>>,
    {
        let mut refs = refs.into_iter();
        let first = refs.next().ok_or(ListError::Empty)?;
        let mut list = Self {
            tag: first.tag().clone(),
            refs: vec![first],
        };
        for r in refs {
            list.push_unique(r)?;
        }
        Ok(list)
    }

    /// Build a list from optional refs, ignoring the absent ones.
    ///
    /// Returns `Ok(None)` when no ref is present.
    pub fn from_optional<I>(refs: I) -> ListResult<Option<Self>>
    where
        I: IntoIterator<Item = Option<EntityRef<T, D>>>,
    {
        let present: Vec<_> = refs.into_iter().flatten().collect();
        if present.is_empty() {
            return Ok(None);
        }
        Self::new(present).map(Some)
    }

    fn push_unique(&mut self, r: EntityRef<T, D>) -> ListResult<()> {
        if *r.tag() != self.tag {
            debug!(expected = %self.tag, actual = %r.tag(), "rejected ref with foreign tag");
            return Err(ListError::TagMismatch {
                expected: self.tag.to_string(),
                actual: r.tag().to_string(),
            });
        }
        if self.has(&r) {
            trace!(tag = %self.tag, "dropped duplicate ref");
            return Ok(());
        }
        self.refs.push(r);
        Ok(())
    }
}

impl<T: PartialEq, D: PartialEq> RefList<T, D> {
    /// Returns `true` if an equal ref is a member.
    pub fn has(&self, r: &EntityRef<T, D>) -> bool {
        self.index_of(r).is_some()
    }

    /// Position of the member equal to `r`.
    pub fn index_of(&self, r: &EntityRef<T, D>) -> Option<usize> {
        self.refs.iter().position(|x| EntityRef::is_equal(x, r))
    }
}

impl<T, D> RefList<T, D> {
    /// The tag shared by every member.
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Always `false`; lists cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// The first member.
    pub fn first(&self) -> &EntityRef<T, D> {
        &self.refs[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityRef<T, D>> {
        self.refs.iter()
    }

    pub fn as_slice(&self) -> &[EntityRef<T, D>] {
        &self.refs
    }

    pub fn into_vec(self) -> Vec<EntityRef<T, D>> {
        self.refs
    }
}

impl<T, D> Tagged for RefList<T, D> {
    type Tag = T;

    fn tag(&self) -> &T {
        &self.tag
    }
}

impl<T: Clone, D> Clone for RefList<T, D> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            refs: self.refs.clone(),
        }
    }
}

impl<T: PartialEq, D: PartialEq> PartialEq for RefList<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.refs == other.refs
    }
}

impl<T: Eq, D: Eq> Eq for RefList<T, D> {}

impl<'a, T, D> IntoIterator for &'a RefList<T, D> {
    type Item = &'a EntityRef<T, D>;
    type IntoIter = std::slice::Iter<'a, EntityRef<T, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}

impl<T, D> IntoIterator for RefList<T, D> {
    type Item = EntityRef<T, D>;
    type IntoIter = std::vec::IntoIter<EntityRef<T, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.into_iter()
    }
}

impl<T: Serialize, D: Serialize> Serialize for RefList<T, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.refs)
    }
}

impl<'de, T, D> Deserialize<'de> for RefList<T, D>
where
    T: Deserialize<'de> + PartialEq + Clone + fmt::Display,
    D: Deserialize<'de> + PartialEq,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let refs = Vec::<EntityRef<T, D>>::deserialize(deserializer)?;
        RefList::new(refs).map_err(serde::de::Error::custom)
    }
}
